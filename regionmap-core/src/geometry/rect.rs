use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::r2::{Coord, R2};

/// Axis-aligned rectangle, boundary included.
///
/// Built from any two opposite corners; the corners are normalized so that
/// `min.x <= max.x` and `min.y <= max.y`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Coord,
    pub max: Coord,
}

impl Rect {
    pub fn new(a: Coord, b: Coord) -> Self {
        Rect {
            min: R2 { x: a.x.min(b.x), y: a.y.min(b.y) },
            max: R2 { x: a.x.max(b.x), y: a.y.max(b.y) },
        }
    }

    /// `x1 <= x <= x2 && y1 <= y <= y2`; points on an edge are inside.
    pub fn contains(&self, p: &Coord) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }
}

impl From<(Coord, Coord)> for Rect {
    fn from((a, b): (Coord, Coord)) -> Self {
        Rect::new(a, b)
    }
}

impl Display for Rect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
