//! Synthetic "donut" point clouds: interior points within an inner radius of a
//! center, exterior points in the ring between the inner and outer radii.

use std::f64::consts::PI;

use rand::Rng;

use regionmap_core::{pointset::PointSet, Coord, R2};

/// Meters per degree of latitude (and of longitude at the equator).
const METERS_PER_DEGREE: f64 = 111_000.;

#[derive(Debug, Clone)]
pub struct DonutConfig {
    /// Center, `x` = longitude, `y` = latitude
    pub center: Coord,
    /// Radius of the interior disk, in meters
    pub inner_radius: f64,
    /// Outer radius of the exterior ring, in meters
    pub outer_radius: f64,
    /// Total number of points
    pub count: usize,
    /// Fraction of points placed inside the inner radius
    pub interior_ratio: f64,
}

impl Default for DonutConfig {
    fn default() -> Self {
        Self {
            center: R2 { x: 80.1534, y: 12.8406 },
            inner_radius: 1750.,
            outer_radius: 4000.,
            count: 15000,
            interior_ratio: 0.3,
        }
    }
}

impl DonutConfig {
    pub fn num_interior(&self) -> usize {
        ((self.count as f64 * self.interior_ratio) as usize).min(self.count)
    }

    /// Point at `radius` meters from the center, at `angle` radians clockwise from north.
    fn offset(&self, radius: f64, angle: f64) -> Coord {
        let lat = radius / METERS_PER_DEGREE * angle.cos();
        let lon = radius / (METERS_PER_DEGREE * self.center.y.to_radians().cos()) * angle.sin();
        R2 { x: self.center.x + lon, y: self.center.y + lat }
    }

    pub fn generate<R: Rng>(&self, rng: &mut R) -> PointSet {
        let num_interior = self.num_interior();
        let mut sample = |r0: f64, r1: f64| {
            let angle = rng.gen_range(0.0..2.0 * PI);
            let radius = if r1 > r0 { rng.gen_range(r0..r1) } else { r0 };
            self.offset(radius, angle)
        };
        let exterior = (0..self.count - num_interior)
            .map(|_| sample(self.inner_radius, self.outer_radius))
            .collect();
        let interior = (0..num_interior).map(|_| sample(0., self.inner_radius)).collect();
        PointSet { interior, exterior }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn meters(config: &DonutConfig, p: &Coord) -> f64 {
        let dy = (p.y - config.center.y) * METERS_PER_DEGREE;
        let dx = (p.x - config.center.x) * METERS_PER_DEGREE * config.center.y.to_radians().cos();
        (dx * dx + dy * dy).sqrt()
    }

    #[test]
    fn counts_and_radii() {
        let config = DonutConfig { count: 1000, ..Default::default() };
        let points = config.generate(&mut StdRng::seed_from_u64(0));
        assert_eq!(points.interior.len(), 300);
        assert_eq!(points.exterior.len(), 700);
        for p in &points.interior {
            assert!(meters(&config, p) <= config.inner_radius + 1e-6);
        }
        for p in &points.exterior {
            let m = meters(&config, p);
            assert!(m >= config.inner_radius - 1e-6 && m <= config.outer_radius + 1e-6, "{}", m);
        }
    }

    #[test]
    fn seeded_runs_repeat() {
        let config = DonutConfig { count: 50, ..Default::default() };
        let a = config.generate(&mut StdRng::seed_from_u64(7));
        let b = config.generate(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn empty_inner_disk() {
        let config = DonutConfig { count: 10, inner_radius: 0., interior_ratio: 0.5, ..Default::default() };
        let points = config.generate(&mut StdRng::seed_from_u64(1));
        assert!(points.interior.iter().all(|p| *p == config.center));
        assert_eq!(points.exterior.len(), 5);
    }
}
