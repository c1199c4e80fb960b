//! Line based point and range queries over an indexed footpath store.
//!
//! Every hit writes the query line, as read, followed by one line per matched footpath to
//! `output`, and `<query> --><path>` to `paths`. Misses write nothing.
use crate::bucket::Bucket;
use crate::error::Result;
use crate::geometry::Rect;
use crate::quadtree::{Path, Quadtree};
use crate::record::Footpath;
use crate::Point;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    /// `x y` per line
    Point,
    /// `bl_x bl_y tr_x tr_y` per line
    Range,
}

/// Totals of a query run.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Summary {
    pub queries: usize,
    pub hits: usize,
    pub skipped: usize,
}

pub fn run<Rd, Out, Paths>(
    mode: Mode,
    tree: &Quadtree<'_, Footpath>,
    input: Rd,
    output: &mut Out,
    paths: &mut Paths,
) -> Result<Summary>
where
    Rd: BufRead,
    Out: Write,
    Paths: Write,
{
    match mode {
        Mode::Point => point_queries(tree, input, output, paths),
        Mode::Range => range_queries(tree, input, output, paths),
    }
}

pub fn point_queries<Rd, Out, Paths>(
    tree: &Quadtree<'_, Footpath>,
    input: Rd,
    output: &mut Out,
    paths: &mut Paths,
) -> Result<Summary>
where
    Rd: BufRead,
    Out: Write,
    Paths: Write,
{
    let mut summary = Summary::default();
    for line in input.lines() {
        let query = line?;
        if query.trim().is_empty() {
            continue;
        }
        let [x, y] = match parse_fields::<2>(&query) {
            Some(fields) => fields,
            None => {
                warn!(%query, "skipping malformed point query");
                summary.skipped += 1;
                continue;
            }
        };

        summary.queries += 1;
        match tree.search(&Point::new(x, y)) {
            Some((leaf, path)) => {
                summary.hits += 1;
                write_matches(output, paths, &query, leaf.bucket(), &path)?;
            }
            None => debug!(%query, "no footpath at point"),
        }
    }
    Ok(summary)
}

pub fn range_queries<Rd, Out, Paths>(
    tree: &Quadtree<'_, Footpath>,
    input: Rd,
    output: &mut Out,
    paths: &mut Paths,
) -> Result<Summary>
where
    Rd: BufRead,
    Out: Write,
    Paths: Write,
{
    let mut summary = Summary::default();
    for line in input.lines() {
        let query = line?;
        if query.trim().is_empty() {
            continue;
        }
        let [blx, bly, trx, try_] = match parse_fields::<4>(&query) {
            Some(fields) => fields,
            None => {
                warn!(%query, "skipping malformed range query");
                summary.skipped += 1;
                continue;
            }
        };

        summary.queries += 1;
        let range = Rect::new(Point::new(blx, bly), Point::new(trx, try_));
        match tree.range_query(&range) {
            Some((matches, path)) => {
                summary.hits += 1;
                write_matches(output, paths, &query, &matches, &path)?;
            }
            None => debug!(%query, "no footpath in range"),
        }
    }
    Ok(summary)
}

fn write_matches<Out: Write, Paths: Write>(
    output: &mut Out,
    paths: &mut Paths,
    query: &str,
    matches: &Bucket<'_, Footpath>,
    path: &Path,
) -> Result<()> {
    writeln!(output, "{}", query)?;
    for footpath in matches.iter() {
        writeln!(output, "{}", footpath)?;
    }
    writeln!(paths, "{} -->{}", query, path)?;
    Ok(())
}

/// The first `N` whitespace separated numbers of `line`. Anything after them is ignored.
fn parse_fields<const N: usize>(line: &str) -> Option<[f64; N]> {
    let mut fields = [0.0; N];
    let mut it = line.split_whitespace();
    for field in fields.iter_mut() {
        *field = it.next()?.parse().ok()?;
    }
    Some(fields)
}
