use std::path::Path;

use log::{debug, info};

use crate::{
    error::GeoJsonError,
    geojson::{coord, Feature, FeatureCollection, Geometry, Label},
    r2::Coord,
};

/// Point features of a collection, split by their `region` label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    pub interior: Vec<Coord>,
    pub exterior: Vec<Coord>,
}

impl PointSet {
    /// Features that are not labeled points are skipped.
    pub fn from_collection(collection: &FeatureCollection) -> Self {
        let mut points = PointSet::default();
        let mut skipped = 0;
        for feature in &collection.features {
            let p = match &feature.geometry {
                Some(Geometry::Point(position)) => coord(position),
                _ => None,
            };
            match (p, feature.region()) {
                (Some(p), Some(Label::Interior)) => points.interior.push(p),
                (Some(p), Some(Label::Exterior)) => points.exterior.push(p),
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!("skipped {} features that are not interior/exterior points", skipped);
        }
        points
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GeoJsonError> {
        let path = path.as_ref();
        let points = Self::from_collection(&FeatureCollection::read(path)?);
        info!(
            "{}: {} interior, {} exterior points",
            path.display(),
            points.interior.len(),
            points.exterior.len(),
        );
        Ok(points)
    }

    pub fn get(&self, label: Label) -> &[Coord] {
        match label {
            Label::Interior => &self.interior,
            Label::Exterior => &self.exterior,
            Label::Other => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.interior.len() + self.exterior.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One point feature per coordinate, interior first.
    pub fn to_collection(&self) -> FeatureCollection {
        let interior = self.interior.iter().map(|p| Feature::point(p, Label::Interior));
        let exterior = self.exterior.iter().map(|p| Feature::point(p, Label::Exterior));
        FeatureCollection::new(interior.chain(exterior).collect())
    }
}
