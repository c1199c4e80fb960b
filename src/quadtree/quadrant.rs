use crate::geometry::Rect;
use crate::Point;
use std::fmt;

/// One of the four children of an internal node.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Quadrant {
    NW = 0,
    NE = 1,
    SW = 2,
    SE = 3,
}

impl Quadrant {
    /// Resolution order for insertion and search. The first quadrant containing a point wins.
    pub const ALL: [Quadrant; 4] = [Quadrant::NW, Quadrant::NE, Quadrant::SW, Quadrant::SE];

    /// Order in which range queries visit children.
    pub const RANGE_ORDER: [Quadrant; 4] =
        [Quadrant::SW, Quadrant::NW, Quadrant::NE, Quadrant::SE];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The part of `parent` this quadrant covers. All four share `parent`'s center.
    pub fn bounds_within(self, parent: &Rect) -> Rect {
        let [cx, cy] = *parent.center();
        let hw = parent.half_width();
        let hh = parent.half_height();

        // | NW | NE |
        // | -- | -- |
        // | SW | SE |
        let (bl, tr) = match self {
            Quadrant::NW => (Point::new(cx - hw, cy), Point::new(cx, cy + hh)),
            Quadrant::NE => (Point::new(cx, cy), Point::new(cx + hw, cy + hh)),
            Quadrant::SW => (Point::new(cx - hw, cy - hh), Point::new(cx, cy)),
            Quadrant::SE => (Point::new(cx, cy - hh), Point::new(cx + hw, cy)),
        };
        Rect::new(bl, tr)
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quadrant::NW => "NW",
            Quadrant::NE => "NE",
            Quadrant::SW => "SW",
            Quadrant::SE => "SE",
        };
        f.write_str(name)
    }
}

/// Directions taken while walking the tree. Diagnostic only.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Path(Vec<Quadrant>);

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, quadrant: Quadrant) {
        self.0.push(quadrant);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Quadrant] {
        self.0.as_slice()
    }
}

/// Every marker is preceded by a single space: `" SW NE"`.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for quadrant in self.0.iter() {
            write!(f, " {}", quadrant)?;
        }
        Ok(())
    }
}
