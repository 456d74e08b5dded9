//! Convex hulls of coordinate sets.
//!
//! Hulls are counter-clockwise, start at their lexicographically smallest vertex
//! (min x, then min y), and are implicitly closed. Inputs with fewer than 3
//! points, or whose points are all coincident or collinear, have no hull.

use std::{
    fmt::{self, Display, Formatter},
    iter,
};

use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{error::InvalidHull, r2::Coord};

/// Relative slack for on-edge tests, so boundary points survive rounding.
const EDGE_TOLERANCE: f64 = 1e-12;

/// Largest coordinate magnitude, as a power of two, used unscaled in
/// orientation tests; squares of differences stay well below `f64::MAX`.
const MAX_UNSCALED_EXP: i32 = 500;

#[derive(Debug, Clone, PartialEq, derive_more::Deref, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coord>", into = "Vec<Coord>")]
pub struct ConvexHull(Vec<Coord>);

/// Compute the convex hull of `points` (Andrew's monotone chain, O(n log n)).
///
/// Returns `None` when there are fewer than 3 finite points, or when all of
/// them are coincident or collinear. Non-finite points are dropped.
pub fn compute_hull(points: &[Coord]) -> Option<ConvexHull> {
    if points.len() < 3 {
        debug!("no hull: {} points", points.len());
        return None;
    }
    let mut sorted: Vec<Coord> = points.iter().filter(|p| p.is_finite()).copied().collect();
    let dropped = points.len() - sorted.len();
    if dropped > 0 {
        warn!("dropped {} non-finite points of {}", dropped, points.len());
    }
    sorted.sort_by(|a, b| a.lex_cmp(b));
    sorted.dedup();
    if sorted.len() < 3 {
        debug!("no hull: {} distinct finite points", sorted.len());
        return None;
    }
    let scale = orientation_scale(&sorted);

    let mut lower: Vec<Coord> = Vec::with_capacity(sorted.len());
    for p in sorted.iter() {
        push_turning_left(&mut lower, *p, scale);
    }
    let mut upper: Vec<Coord> = Vec::with_capacity(sorted.len());
    for p in sorted.iter().rev() {
        push_turning_left(&mut upper, *p, scale);
    }

    // Each chain ends where the other begins
    lower.pop();
    upper.pop();
    lower.extend(upper);

    if lower.len() < 3 {
        debug!("no hull: {} points are collinear", sorted.len());
        return None;
    }
    Some(ConvexHull(lower))
}

fn push_turning_left(chain: &mut Vec<Coord>, p: Coord, scale: f64) {
    while chain.len() >= 2 {
        let (o, a) = (chain[chain.len() - 2] * scale, chain[chain.len() - 1] * scale);
        if o.cross(&a, &(p * scale)) > 0. {
            break;
        }
        chain.pop();
    }
    chain.push(p);
}

/// Power-of-two factor bringing the finite `points` within `2^MAX_UNSCALED_EXP`,
/// so edge vectors and cross products can't overflow; 1 for ordinary input.
fn orientation_scale<'a>(points: impl IntoIterator<Item = &'a Coord>) -> f64 {
    let max = points.into_iter().map(|p| p.x.abs().max(p.y.abs())).fold(0., f64::max);
    if max <= 2f64.powi(MAX_UNSCALED_EXP) {
        1.
    } else {
        2f64.powi(MAX_UNSCALED_EXP - max.log2().ceil() as i32)
    }
}

impl ConvexHull {
    /// Rebuild a hull from a vertex ring, e.g. one read back from GeoJSON.
    ///
    /// The ring may be explicitly closed (last vertex equal to the first) and
    /// may run clockwise; it must otherwise list exactly the hull's vertices in
    /// rotational order. Counter-clockwise rings keep their order; clockwise
    /// rings are reversed in place, keeping their first vertex.
    pub fn from_ring(mut ring: Vec<Coord>) -> Result<Self, InvalidHull> {
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.iter().any(|p| !p.is_finite()) {
            return Err(InvalidHull::NonFinite);
        }
        let hull = compute_hull(&ring).ok_or(InvalidHull::Degenerate(ring.len()))?;
        let n = ring.len();
        if hull.len() != n {
            return Err(InvalidHull::NotConvex);
        }
        let start = hull.iter().position(|v| *v == ring[0]).ok_or(InvalidHull::NotConvex)?;
        if (0..n).all(|i| ring[i] == hull[(start + i) % n]) {
            return Ok(ConvexHull(ring));
        }
        if (0..n).all(|i| ring[i] == hull[(start + n - i) % n]) {
            debug!("reversing clockwise ring of {} vertices", n);
            ring[1..].reverse();
            return Ok(ConvexHull(ring));
        }
        Err(InvalidHull::NotConvex)
    }

    pub fn vertices(&self) -> &[Coord] {
        &self.0
    }

    pub fn into_vertices(self) -> Vec<Coord> {
        self.0
    }

    /// Shoelace area; positive, since vertices run counter-clockwise.
    pub fn area(&self) -> f64 {
        self.0
            .iter()
            .circular_tuple_windows()
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum::<f64>()
            / 2.
    }

    /// Whether `p` lies inside or on the boundary.
    pub fn contains(&self, p: &Coord) -> bool {
        if !p.is_finite() {
            return false;
        }
        let scale = orientation_scale(self.0.iter().chain(iter::once(p)));
        let p = *p * scale;
        self.0.iter().circular_tuple_windows().all(|(a, b)| {
            let (a, b) = (*a * scale, *b * scale);
            let (edge, offset) = (b - a, p - a);
            let tolerance = EDGE_TOLERANCE * edge.x.hypot(edge.y) * offset.x.hypot(offset.y);
            a.cross(&b, &p) >= -tolerance
        })
    }
}

impl TryFrom<Vec<Coord>> for ConvexHull {
    type Error = InvalidHull;
    fn try_from(ring: Vec<Coord>) -> Result<Self, Self::Error> {
        ConvexHull::from_ring(ring)
    }
}

impl From<ConvexHull> for Vec<Coord> {
    fn from(hull: ConvexHull) -> Self {
        hull.0
    }
}

impl Display for ConvexHull {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "hull[{}]", self.0.iter().map(|v| v.to_string()).join(", "))
    }
}
