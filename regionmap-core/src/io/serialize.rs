//! Hull output: closed rings and GeoJSON polygon features, and the way back.

use std::path::Path;

use log::info;

use crate::{
    error::GeoJsonError,
    geojson::{coord, position, Feature, FeatureCollection, Geometry, Label},
    hull::ConvexHull,
    r2::Coord,
};

/// Hull vertices followed by a copy of the first one.
#[derive(Debug, Clone, PartialEq, derive_more::Deref)]
pub struct ClosedRing(Vec<Coord>);

impl ClosedRing {
    pub fn into_vertices(self) -> Vec<Coord> {
        self.0
    }
}

/// Close `hull` into an explicit ring; no hull, no ring.
pub fn close_polygon(hull: Option<&ConvexHull>) -> Option<ClosedRing> {
    let hull = hull?;
    let mut ring = Vec::with_capacity(hull.len() + 1);
    ring.extend_from_slice(hull.vertices());
    ring.push(hull[0]);
    Some(ClosedRing(ring))
}

pub fn hull_feature(ring: &ClosedRing, region: Label) -> Feature {
    Feature::new(Geometry::Polygon(vec![ring.iter().map(position).collect()]), region)
}

pub fn hull_collection(hull: Option<&ConvexHull>, region: Label) -> Option<FeatureCollection> {
    close_polygon(hull).map(|ring| FeatureCollection::new(vec![hull_feature(&ring, region)]))
}

/// Write `hull` as a one-feature collection. Without a hull nothing is written
/// and `Ok(false)` is returned.
pub fn write_hull(path: impl AsRef<Path>, hull: Option<&ConvexHull>, region: Label) -> Result<bool, GeoJsonError> {
    let path = path.as_ref();
    match hull_collection(hull, region) {
        None => {
            info!("Skipping {} hull: not enough points", region.name());
            Ok(false)
        }
        Some(collection) => {
            collection.write(path)?;
            info!("Saved {} convex hull to {}", region.name(), path.display());
            Ok(true)
        }
    }
}

/// A hull read back from a polygon feature.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledHull {
    pub region: Option<Label>,
    pub hull: ConvexHull,
}

/// Hulls of the polygon features of `collection`, from each outer ring.
/// Other geometries are ignored.
pub fn polygon_hulls(collection: &FeatureCollection) -> Result<Vec<LabeledHull>, GeoJsonError> {
    let mut hulls = Vec::new();
    for (index, feature) in collection.features.iter().enumerate() {
        let Some(Geometry::Polygon(rings)) = &feature.geometry else {
            continue;
        };
        let outer = rings.first().ok_or(GeoJsonError::MissingRing { index })?;
        let ring = outer
            .iter()
            .map(|p| coord(p))
            .collect::<Option<Vec<Coord>>>()
            .ok_or(GeoJsonError::InvalidPosition { index })?;
        let hull = ConvexHull::from_ring(ring).map_err(|source| GeoJsonError::InvalidRing { index, source })?;
        hulls.push(LabeledHull { region: feature.region(), hull });
    }
    Ok(hulls)
}
