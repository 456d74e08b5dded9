use std::fmt::{self, Display, Formatter};

use derive_more::From;
use serde::{Deserialize, Serialize};

use crate::{hull::ConvexHull, r2::Coord, rect::Rect};

/// A closed boundary tracked by the registry. Equality is by value.
#[derive(Debug, Clone, From, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "bounds", rename_all = "snake_case")]
pub enum AffectedRegion {
    Rect(Rect),
    Polygon(ConvexHull),
}

impl AffectedRegion {
    /// Rectangle from two opposite corners.
    pub fn rect(a: Coord, b: Coord) -> Self {
        AffectedRegion::Rect(Rect::new(a, b))
    }
}

impl Display for AffectedRegion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AffectedRegion::Rect(rect) => write!(f, "rect{}", rect),
            AffectedRegion::Polygon(hull) => write!(f, "{}", hull),
        }
    }
}

/// Answer to a membership query.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Membership {
    Affected,
    Unaffected,
}

impl Membership {
    pub fn is_affected(&self) -> bool {
        *self == Membership::Affected
    }
}

impl Display for Membership {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Membership::Affected => write!(f, "Affected"),
            Membership::Unaffected => write!(f, "Unaffected"),
        }
    }
}
