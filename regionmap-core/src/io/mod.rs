pub mod geojson;
pub mod pointset;
pub mod serialize;
