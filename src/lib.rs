//! Point-region Quadtree over footpath segment endpoints.
//! # Contracts:
//! - Records are borrowed, never owned: the record store must outlive the tree.
//! - The root bounds are fixed at construction; points outside of them are rejected.
//!
pub mod bucket;
pub mod error;
pub mod geometry;
pub mod query;
pub mod quadtree;
pub mod record;

pub use bucket::Bucket;
pub use error::{Error, OutOfBounds, Result};
pub use geometry::Rect;
pub use quadtree::{Leaf, Path, QuadNode, Quadrant, Quadtree};
pub use record::Footpath;

use geometry::F64_EPSILON;
use std::fmt;
use std::ops::Deref;

#[derive(Debug, Clone, Copy, Default)]
pub struct Point(pub [f64; 2]);

impl Deref for Point {
    type Target = [f64; 2];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self[0], self[1])
    }
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self([x, y])
    }

    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn y(&self) -> f64 {
        self.0[1]
    }

    /// Points are equal when both axes differ by less than [`F64_EPSILON`].
    pub fn approx_eq(&self, rhs: &Self) -> bool {
        self.approx_eq_within(rhs, F64_EPSILON)
    }

    pub fn approx_eq_within(&self, rhs: &Self, epsilon: f64) -> bool {
        (self[0] - rhs[0]).abs() < epsilon && (self[1] - rhs[1]).abs() < epsilon
    }
}

/// Identifier of a record. Buckets are ordered by it.
pub type Key = u32;

/// Anything the tree can index. The tree only ever looks at the key.
pub trait Record {
    fn key(&self) -> Key;
}

impl<R: Record + ?Sized> Record for &R {
    fn key(&self) -> Key {
        (**self).key()
    }
}

/// Bare keyed record, handy when the payload lives elsewhere.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Value(pub Key);

impl Record for Value {
    fn key(&self) -> Key {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_within_epsilon_are_equal() {
        let a = Point::new(144.963_8, -37.813_6);
        let b = Point::new(144.963_8 + 1e-13, -37.813_6 - 1e-13);
        assert!(a.approx_eq(&b));
        assert!(b.approx_eq(&a));
    }

    #[test]
    fn points_differing_on_one_axis_are_not_equal() {
        let a = Point::new(1.0, 2.0);
        assert!(!a.approx_eq(&Point::new(1.0, 2.0 + 1e-9)));
        assert!(!a.approx_eq(&Point::new(1.0 + 1e-9, 2.0)));
    }

    #[test]
    fn custom_tolerance() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(1.000_000_5, 1.0);
        assert!(!a.approx_eq(&b));
        assert!(a.approx_eq_within(&b, 1e-6));
    }

    #[test]
    fn neighbouring_floats_differ_above_4096() {
        let next = |v: f64| f64::from_bits(v.to_bits() + 1);

        let small = Point::new(1000.0, 5.0);
        assert!(small.approx_eq(&Point::new(next(1000.0), 5.0)));

        let large = Point::new(123_456.789, 5.0);
        assert!(!large.approx_eq(&Point::new(next(123_456.789), 5.0)));
    }

    #[test]
    fn references_forward_the_key() {
        let v = Value(42);
        let r = &v;
        assert_eq!(Record::key(&r), 42);
    }
}
