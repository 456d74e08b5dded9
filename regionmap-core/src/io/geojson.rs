//! The subset of GeoJSON this crate reads and writes: feature collections of
//! `Point` and `Polygon` features labeled by a `region` property.
//!
//! Positions are `[longitude, latitude]`, matching `R2 { x, y }`.

use std::{fs, path::Path};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{error::GeoJsonError, r2::Coord};

/// GeoJSON position; trailing elements (altitude) are ignored.
pub type Position = Vec<f64>;

pub fn coord(position: &[f64]) -> Option<Coord> {
    match position {
        [x, y, ..] => Some(Coord { x: *x, y: *y }),
        _ => None,
    }
}

pub fn position(p: &Coord) -> Position {
    vec![p.x, p.y]
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Interior,
    Exterior,
    #[serde(other)]
    Other,
}

impl Label {
    pub fn from_name(name: &str) -> Self {
        match name {
            "interior" => Label::Interior,
            "exterior" => Label::Exterior,
            _ => Label::Other,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Label::Interior => "interior",
            Label::Exterior => "exterior",
            Label::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates", try_from = "RawGeometry")]
pub enum Geometry {
    Point(Position),
    Polygon(Vec<Vec<Position>>),
    /// Any other geometry type (`LineString`, `MultiPoint`, ...), by name.
    #[serde(skip_serializing)]
    Other(String),
}

#[derive(Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

impl TryFrom<RawGeometry> for Geometry {
    type Error = serde_json::Error;
    fn try_from(raw: RawGeometry) -> Result<Self, Self::Error> {
        match raw.kind.as_str() {
            "Point" => Ok(Geometry::Point(serde_json::from_value(raw.coordinates)?)),
            "Polygon" => Ok(Geometry::Polygon(serde_json::from_value(raw.coordinates)?)),
            _ => Ok(Geometry::Other(raw.kind)),
        }
    }
}

/// `null` or absent is no label; any non-string value is an unknown one.
fn lenient_label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Label>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(name) => Some(Label::from_name(&name)),
        _ => Some(Label::Other),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    #[serde(default, deserialize_with = "lenient_label", skip_serializing_if = "Option::is_none")]
    pub region: Option<Label>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureType {
    #[default]
    Feature,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default)]
    pub kind: FeatureType,
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<Properties>,
}

impl Feature {
    pub fn new(geometry: Geometry, region: Label) -> Self {
        Feature {
            kind: FeatureType::Feature,
            geometry: Some(geometry),
            properties: Some(Properties { region: Some(region), extra: Map::new() }),
        }
    }

    pub fn point(p: &Coord, region: Label) -> Self {
        Feature::new(Geometry::Point(position(p)), region)
    }

    pub fn region(&self) -> Option<Label> {
        self.properties.as_ref().and_then(|props| props.region)
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureCollectionType {
    #[default]
    FeatureCollection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default)]
    pub kind: FeatureCollectionType,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        FeatureCollection { kind: FeatureCollectionType::FeatureCollection, features }
    }

    pub fn parse(text: &str) -> Result<Self, GeoJsonError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, GeoJsonError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Pretty-printed, like the files the rest of the pipeline produces.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), GeoJsonError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
