//! End-to-end runs of the `regionmap` binary in temporary directories.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn regionmap(dir: &Path, args: &[&str]) -> Output {
    let output = Command::new(env!("CARGO_BIN_EXE_regionmap"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to run regionmap");
    assert!(
        output.status.success(),
        "regionmap {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr),
    );
    output
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn generate_then_hull() {
    let dir = TempDir::new().unwrap();
    regionmap(dir.path(), &["generate", "points.geojson", "--count", "500", "--seed", "42"]);
    let points: serde_json::Value = serde_json::from_str(&fs::read_to_string(dir.path().join("points.geojson")).unwrap()).unwrap();
    assert_eq!(points["features"].as_array().unwrap().len(), 500);

    let output = regionmap(dir.path(), &["hull", "points.geojson", "--out-dir", "hulls"]);
    let out = stdout(&output);
    assert!(out.contains("interior:"), "{}", out);
    assert!(out.contains("exterior:"), "{}", out);

    for label in ["interior", "exterior"] {
        let text = fs::read_to_string(dir.path().join("hulls").join(format!("{}_hull.geojson", label))).unwrap();
        let hull: serde_json::Value = serde_json::from_str(&text).unwrap();
        let feature = &hull["features"][0];
        assert_eq!(feature["properties"]["region"], label);
        assert_eq!(feature["geometry"]["type"], "Polygon");
        let ring = feature["geometry"]["coordinates"][0].as_array().unwrap();
        assert!(ring.len() >= 4);
        assert_eq!(ring.first(), ring.last());
    }
}

#[test]
fn hull_skips_sparse_labels() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("points.geojson"),
        r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0, 0]}, "properties": {"region": "interior"}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [1, 0]}, "properties": {"region": "interior"}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0, 1]}, "properties": {"region": "interior"}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [5, 5]}, "properties": {"region": "exterior"}}
        ]}"#,
    )
    .unwrap();
    regionmap(dir.path(), &["hull", "points.geojson"]);
    assert!(dir.path().join("interior_hull.geojson").exists());
    assert!(!dir.path().join("exterior_hull.geojson").exists());
}

#[test]
fn region_lifecycle() {
    let dir = TempDir::new().unwrap();
    let check = |lon: &str, lat: &str| stdout(&regionmap(dir.path(), &["region", "check", "--lon", lon, "--lat", lat]));

    assert_eq!(check("5", "5"), "Unaffected");
    regionmap(dir.path(), &["region", "add", "0", "0", "10", "10"]);
    assert_eq!(check("5", "5"), "Affected");
    assert_eq!(check("10", "10"), "Affected");
    assert_eq!(check("15", "15"), "Unaffected");

    regionmap(dir.path(), &["region", "add", "-20", "-20", "-15", "-15"]);
    assert_eq!(check("-17.5", "-16"), "Affected");
    assert_eq!(stdout(&regionmap(dir.path(), &["region", "list"])).lines().count(), 2);
    assert!(dir.path().join("EMS").join("MAP.json").exists());

    let removed = stdout(&regionmap(dir.path(), &["region", "remove", "10", "10", "0", "0"]));
    assert!(removed.starts_with("Removed"), "{}", removed);
    assert_eq!(check("5", "5"), "Unaffected");
    let again = stdout(&regionmap(dir.path(), &["region", "remove", "0", "0", "10", "10"]));
    assert!(again.starts_with("Not present"), "{}", again);
}

#[test]
fn hull_output_seeds_registry() {
    let dir = TempDir::new().unwrap();
    regionmap(dir.path(), &["generate", "points.geojson", "--count", "300", "--seed", "1"]);
    regionmap(dir.path(), &["hull", "points.geojson"]);
    let added = stdout(&regionmap(
        dir.path(),
        &["region", "add-hull", "interior_hull.geojson", "--region", "interior"],
    ));
    assert_eq!(added, "Added 1 hull regions");
    assert_eq!(stdout(&regionmap(dir.path(), &["region", "check", "--lon", "80.1534", "--lat", "12.8406"])), "Affected");
    assert_eq!(stdout(&regionmap(dir.path(), &["region", "check", "--lon", "81", "--lat", "12.8406"])), "Unaffected");
}

#[test]
fn custom_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("registry.json"), r#"{"database": "ops", "collection": "zones", "deadlineMs": 60000}"#).unwrap();
    regionmap(dir.path(), &["region", "--config", "registry.json", "add", "0", "0", "1", "1"]);
    assert!(dir.path().join("ops").join("zones.json").exists());
    assert!(!dir.path().join("EMS").exists());
}
