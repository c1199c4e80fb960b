//! Point-region Quadtree.
//!
//! Every node is either empty, a leaf holding exactly one distinct coordinate together with the
//! [`Bucket`] of records located there, or an internal node with exactly four children.
//! A leaf becomes internal the first time a second, different coordinate lands in it. Internal
//! nodes never turn back into leaves.
mod quadrant;

pub use quadrant::{Path, Quadrant};

use crate::bucket::Bucket;
use crate::error::OutOfBounds;
use crate::geometry::Rect;
use crate::{Point, Record};
use std::mem;
use tracing::{debug, error, trace};

type Children<'a, R> = Box<[QuadNode<'a, R>; 4]>;

#[derive(Debug)]
pub struct Quadtree<'a, R> {
    root: QuadNode<'a, R>,
    node_count: usize,
}

#[derive(Debug)]
pub struct QuadNode<'a, R> {
    // fixed at creation
    bounds: Rect,
    state: State<'a, R>,
}

#[derive(Debug)]
enum State<'a, R> {
    Empty,
    Leaf(Leaf<'a, R>),
    Internal(Children<'a, R>),
}

/// A single coordinate and every record inserted at it.
#[derive(Debug)]
pub struct Leaf<'a, R> {
    point: Point,
    bucket: Bucket<'a, R>,
}

impl<'a, R> Quadtree<'a, R> {
    /// Create an empty tree. `bounds` limit every future insertion.
    pub fn new(bounds: Rect) -> Self {
        Self {
            root: QuadNode::new(bounds),
            node_count: 1,
        }
    }

    pub fn bounds(&self) -> &Rect {
        &self.root.bounds
    }

    pub fn root(&self) -> &QuadNode<'a, R> {
        &self.root
    }

    /// Number of nodes, including empty ones.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of distinct coordinates stored.
    pub fn leaf_count(&self) -> usize {
        self.root.count_leaves()
    }

    /// Find the leaf holding `point`.
    ///
    /// Also returns the directions taken from the root to reach it.
    pub fn search(&self, point: &Point) -> Option<(&Leaf<'a, R>, Path)> {
        if !self.root.bounds.contains(point) {
            return None;
        }

        let mut path = Path::new();
        let mut node = &self.root;
        while let State::Internal(ref children) = node.state {
            let quadrant = quadrant_of(&node.bounds, children, point);
            path.push(quadrant);
            node = &children[quadrant.index()];
        }

        match node.state {
            State::Leaf(ref leaf) if leaf.point.approx_eq(point) => Some((leaf, path)),
            _ => None,
        }
    }

    /// Release every node and leave a single empty root behind.
    ///
    /// Records are borrowed and stay untouched.
    pub fn clear(&mut self) {
        let bounds = self.root.bounds;
        let root = mem::replace(&mut self.root, QuadNode::new(bounds));
        let released = root.release();
        debug_assert_eq!(released, self.node_count);
        debug!(released, "released quadtree nodes");
        self.node_count = 1;
    }
}

impl<'a, R: Record> Quadtree<'a, R> {
    /// Returns `Err` with the rejected point if it lies outside the bounds of the tree.
    pub fn insert(&mut self, point: Point, record: &'a R) -> Result<(), OutOfBounds> {
        let res = self.root.insert(point, record, &mut self.node_count);
        if let Err(OutOfBounds(p)) = res {
            debug!(point = %p, key = record.key(), "rejected point outside of the tree bounds");
        }
        res
    }

    /// Insert every pair, returns the number of rejected points.
    pub fn extend<It>(&mut self, it: It) -> usize
    where
        It: IntoIterator<Item = (Point, &'a R)>,
    {
        let mut rejected = 0;
        for (point, record) in it {
            if self.insert(point, record).is_err() {
                rejected += 1;
            }
        }
        rejected
    }

    /// Collect every record located inside `range`, each key at most once, in ascending key
    /// order.
    ///
    /// Returns `None` if nothing matched. Otherwise also returns the directions taken by the
    /// traversal.
    pub fn range_query(&self, range: &Rect) -> Option<(Bucket<'a, R>, Path)> {
        let mut matches = Bucket::new();
        let mut path = Path::new();
        self.root.collect_in(range, &mut matches, &mut path);

        if matches.is_empty() {
            return None;
        }
        Some((matches, path))
    }
}

impl<'a, R> QuadNode<'a, R> {
    fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            state: State::Empty,
        }
    }

    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.state, State::Empty)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.state, State::Leaf(_))
    }

    pub fn is_internal(&self) -> bool {
        matches!(self.state, State::Internal(_))
    }

    pub fn leaf(&self) -> Option<&Leaf<'a, R>> {
        match self.state {
            State::Leaf(ref leaf) => Some(leaf),
            _ => None,
        }
    }

    /// `None` unless this node is internal.
    pub fn child(&self, quadrant: Quadrant) -> Option<&QuadNode<'a, R>> {
        match self.state {
            State::Internal(ref children) => Some(&children[quadrant.index()]),
            _ => None,
        }
    }

    fn count_leaves(&self) -> usize {
        match self.state {
            State::Empty => 0,
            State::Leaf(_) => 1,
            State::Internal(ref children) => children.iter().map(QuadNode::count_leaves).sum(),
        }
    }

    /// Consume the subtree, returns the number of nodes released.
    fn release(self) -> usize {
        match self.state {
            State::Internal(children) => {
                let children = *children;
                1 + children.into_iter().map(QuadNode::release).sum::<usize>()
            }
            // a leaf takes its point and bucket with it, the records are not ours
            _ => 1,
        }
    }
}

impl<'a, R: Record> QuadNode<'a, R> {
    fn insert(
        &mut self,
        point: Point,
        record: &'a R,
        node_count: &mut usize,
    ) -> Result<(), OutOfBounds> {
        if !self.bounds.contains(&point) {
            return Err(OutOfBounds(point));
        }

        match self.state {
            State::Empty => {
                self.state = State::Leaf(Leaf::new(point, record));
                return Ok(());
            }
            State::Leaf(ref mut leaf) if leaf.point.approx_eq(&point) => {
                // the stored point stays, the argument is dropped
                leaf.bucket.insert_sorted(record);
                return Ok(());
            }
            State::Leaf(_) => {
                self.subdivide();
                *node_count += 4;
            }
            State::Internal(_) => {}
        }

        let bounds = &self.bounds;
        match self.state {
            State::Internal(ref mut children) => {
                let quadrant = quadrant_of(bounds, children, &point);
                children[quadrant.index()].insert(point, record, node_count)
            }
            _ => unreachable!("a non-empty leaf was subdivided above"),
        }
    }

    /// Turn a leaf into an internal node and move its payload into the child that contains it.
    fn subdivide(&mut self) {
        let bounds = self.bounds;
        let mut children: Children<'a, R> =
            Box::new(Quadrant::ALL.map(|q| QuadNode::new(q.bounds_within(&bounds))));

        let leaf = match mem::replace(&mut self.state, State::Empty) {
            State::Leaf(leaf) => leaf,
            _ => unreachable!("only leaves are subdivided"),
        };

        let quadrant = quadrant_of(&self.bounds, &children, &leaf.point);
        trace!(point = %leaf.point, %quadrant, "subdivided leaf");
        children[quadrant.index()].state = State::Leaf(leaf);
        self.state = State::Internal(children);
    }

    fn collect_in(&self, range: &Rect, matches: &mut Bucket<'a, R>, path: &mut Path) {
        if !self.bounds.intersects(range) {
            return;
        }

        match self.state {
            State::Leaf(ref leaf) => {
                if range.contains(&leaf.point) {
                    for record in leaf.bucket.iter() {
                        // a record may sit at several points, e.g. both ends of a segment
                        if matches.find(record.key()).is_none() {
                            matches.insert_sorted(record);
                        }
                    }
                }
            }
            State::Internal(ref children) => {
                for &quadrant in Quadrant::RANGE_ORDER.iter() {
                    let child = &children[quadrant.index()];
                    if !child.is_empty() && child.bounds.intersects(range) {
                        path.push(quadrant);
                        child.collect_in(range, matches, path);
                    }
                }
            }
            State::Empty => {}
        }
    }
}

impl<'a, R> Leaf<'a, R> {
    pub fn point(&self) -> Point {
        self.point
    }

    pub fn bucket(&self) -> &Bucket<'a, R> {
        &self.bucket
    }
}

impl<'a, R: Record> Leaf<'a, R> {
    fn new(point: Point, record: &'a R) -> Self {
        let mut bucket = Bucket::new();
        bucket.insert_sorted(record);
        Self { point, bucket }
    }
}

/// Pick the first child, in [`Quadrant::ALL`] order, whose bounds contain `point`.
///
/// Panics if none does: the point was inside the parent, so this is a geometry bug and carrying
/// on would lose data.
fn quadrant_of<R>(parent: &Rect, children: &[QuadNode<'_, R>; 4], point: &Point) -> Quadrant {
    match Quadrant::ALL
        .iter()
        .find(|q| children[q.index()].bounds.contains(point))
    {
        Some(quadrant) => *quadrant,
        None => unresolved_quadrant(parent, point),
    }
}

#[cold]
#[inline(never)]
fn unresolved_quadrant(parent: &Rect, point: &Point) -> ! {
    error!(%point, ?parent, "no quadrant contains the point");
    panic!("no quadrant of {:?} contains {}", parent, point)
}
