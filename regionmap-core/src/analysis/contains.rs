use crate::{hull::ConvexHull, r2::Coord, rect::Rect, registry::AffectedRegion};

/// Inclusive containment: points on the boundary count as contained.
pub trait Contains<O> {
    fn contains(&self, o: &O) -> bool;
}

impl Contains<Coord> for Rect {
    fn contains(&self, p: &Coord) -> bool {
        Rect::contains(self, p)
    }
}

impl Contains<Coord> for ConvexHull {
    fn contains(&self, p: &Coord) -> bool {
        ConvexHull::contains(self, p)
    }
}

impl Contains<Coord> for AffectedRegion {
    fn contains(&self, p: &Coord) -> bool {
        match self {
            AffectedRegion::Rect(rect) => rect.contains(p),
            AffectedRegion::Polygon(hull) => hull.contains(p),
        }
    }
}

/// Index of the first region containing `p`, scanning in order.
pub fn first_containing<'a, C, I>(regions: I, p: &Coord) -> Option<usize>
where
    C: Contains<Coord> + 'a,
    I: IntoIterator<Item = &'a C>,
{
    regions.into_iter().position(|r| r.contains(p))
}
