//! Convex-hull summaries of labeled point clouds, and a persisted registry of
//! affected regions answering point-containment queries.
//!
//! Axis convention, everywhere in this crate: `x` is longitude, `y` is latitude.

#[cfg(test)]
#[macro_use]
extern crate approx;

// Organized modules
pub mod analysis;
pub mod geometry;
pub mod io;
pub mod registry;
pub mod storage;

// Utility modules
pub mod config;
pub mod error;

pub use geometry::hull;
pub use geometry::r2;
pub use geometry::rect;

pub use analysis::contains;

pub use io::geojson;
pub use io::pointset;
pub use io::serialize;

// Re-export key types for external use
pub use config::RegistryConfig;
pub use error::{GeoJsonError, RegistryError, StorageError};
pub use hull::{compute_hull, ConvexHull};
pub use r2::{Coord, R2};
pub use rect::Rect;
pub use registry::{AffectedRegion, Membership, RegionRegistry, SharedRegistry};
pub use serialize::{close_polygon, ClosedRing};
pub use storage::{DeadlineStore, DocumentStore, JsonFileStore, MemoryStore};

/// Parse a log level string into LevelFilter.
pub fn parse_log_level(level: Option<&str>) -> Option<log::LevelFilter> {
    match level {
        Some("off") => Some(log::LevelFilter::Off),
        Some("error") => Some(log::LevelFilter::Error),
        Some("warn") => Some(log::LevelFilter::Warn),
        Some("info") | Some("") | None => Some(log::LevelFilter::Info),
        Some("debug") => Some(log::LevelFilter::Debug),
        Some("trace") => Some(log::LevelFilter::Trace),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn log_levels() {
        assert_eq!(parse_log_level(None), Some(log::LevelFilter::Info));
        assert_eq!(parse_log_level(Some("debug")), Some(log::LevelFilter::Debug));
        assert_eq!(parse_log_level(Some("off")), Some(log::LevelFilter::Off));
        assert_eq!(parse_log_level(Some("loud")), None);
    }
}
