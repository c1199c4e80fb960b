//! Axis aligned rectangles and the comparison tolerances used by the tree.
use crate::Point;

/// Tolerance used by [`Point::approx_eq`].
///
/// Above a magnitude of 4096 neighbouring `f64` values are further apart than this, so two
/// coordinates one step apart compare as different points while no split line can fall between
/// them. Inserting both aborts with a quadrant resolution panic. Geographic coordinates stay well
/// below that magnitude.
pub const F64_EPSILON: f64 = 0.000_000_000_001;

/// AABB stored as its corners plus center and half extents.
/// The derived fields are computed once in [`Rect::new`].
#[derive(Debug, Clone, Copy)]
pub struct Rect {
    bl: Point,
    tr: Point,

    ctr: Point,
    hw: f64,
    hh: f64,
}

impl Rect {
    pub fn new(bl: Point, tr: Point) -> Self {
        let hw = (tr[0] - bl[0]).abs() / 2.0;
        let hh = (tr[1] - bl[1]).abs() / 2.0;
        Self {
            bl,
            tr,
            ctr: Point::new(tr[0] - hw, tr[1] - hh),
            hw,
            hh,
        }
    }

    pub fn bottom_left(&self) -> Point {
        self.bl
    }

    pub fn top_right(&self) -> Point {
        self.tr
    }

    pub fn center(&self) -> Point {
        self.ctr
    }

    pub fn half_width(&self) -> f64 {
        self.hw
    }

    pub fn half_height(&self) -> f64 {
        self.hh
    }

    /// Half-open containment test.
    ///
    /// x is open on the left and closed on the right, y is closed at the bottom and open at the
    /// top. Sibling quadrants therefore never both claim a point on their shared edge.
    pub fn contains(&self, point: &Point) -> bool {
        let [x, y] = **point;
        let [cx, cy] = *self.ctr;

        (cx - self.hw < x && x <= cx + self.hw) && (cy - self.hh <= y && y < cy + self.hh)
    }

    /// Closed overlap test, touching edges intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        // separating axis test on the centers
        (self.ctr[0] - other.ctr[0]).abs() <= self.hw + other.hw
            && (self.ctr[1] - other.ctr[1]).abs() <= self.hh + other.hh
    }
}
