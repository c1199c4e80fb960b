//! Error types.

use crate::Point;
use thiserror::Error;

/// An insertion fell outside the bounds of the tree. Hands the point back to the caller.
#[derive(Debug, Clone, Copy, Error)]
#[error("point {0} lies outside the bounds of the tree")]
pub struct OutOfBounds(pub Point);

impl OutOfBounds {
    pub fn into_point(self) -> Point {
        self.0
    }
}

/// Errors that can occur while loading records or answering queries.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
