use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use regionmap_core::{
    compute_hull,
    geojson::{FeatureCollection, Label},
    pointset::PointSet,
    serialize::{polygon_hulls, write_hull},
    AffectedRegion, DocumentStore, RegionRegistry, RegistryConfig, R2,
};

use crate::{generate::DonutConfig, Corners, RegionCommand};

impl Corners {
    fn region(&self) -> AffectedRegion {
        AffectedRegion::rect(R2 { x: self.lon1, y: self.lat1 }, R2 { x: self.lon2, y: self.lat2 })
    }
}

pub fn hull(input: &Path, out_dir: &Path) -> Result<()> {
    let points = PointSet::load(input).with_context(|| format!("reading {}", input.display()))?;
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    for label in [Label::Interior, Label::Exterior] {
        let hull = compute_hull(points.get(label));
        let path = out_dir.join(format!("{}_hull.geojson", label.name()));
        if let Some(hull) = &hull {
            println!("{}: {} vertices, area {:.6}", label.name(), hull.len(), hull.area());
        }
        write_hull(&path, hull.as_ref(), label).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

pub fn generate(config: &DonutConfig, seed: Option<u64>, output: &Path) -> Result<()> {
    if !(0. ..=1.).contains(&config.interior_ratio) {
        bail!("interior ratio must be within [0, 1], got {}", config.interior_ratio);
    }
    if config.inner_radius < 0. || config.outer_radius < config.inner_radius {
        bail!("need 0 <= inner radius <= outer radius, got {} and {}", config.inner_radius, config.outer_radius);
    }
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let points = config.generate(&mut rng);
    points.to_collection().write(output).with_context(|| format!("writing {}", output.display()))?;
    info!("Points saved to {}", output.display());
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<RegistryConfig> {
    match path {
        None => Ok(RegistryConfig::default()),
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            RegistryConfig::from_json(&text).with_context(|| format!("parsing {}", path.display()))
        }
    }
}

pub fn region(store_dir: &Path, config: Option<&Path>, command: RegionCommand) -> Result<()> {
    let config = load_config(config)?;
    let store = config.open_file_store(store_dir).context("opening region store")?;
    let mut registry = RegionRegistry::open(store, config.document_id.clone()).context("loading affected regions")?;

    match command {
        RegionCommand::Add(corners) => {
            let region = corners.region();
            registry.add_region(region.clone())?;
            println!("Added {}", region);
        }
        RegionCommand::Remove(corners) => {
            let region = corners.region();
            if registry.remove_region(&region)? {
                println!("Removed {}", region);
            } else {
                println!("Not present: {}", region);
            }
        }
        RegionCommand::AddHull { input, region } => add_hulls(&mut registry, &input, region.as_deref())?,
        RegionCommand::Check { lon, lat } => {
            println!("{}", registry.check_membership(&R2 { x: lon, y: lat }));
        }
        RegionCommand::List => {
            for region in registry.regions() {
                println!("{}", region);
            }
        }
    }
    Ok(())
}

fn add_hulls<S: DocumentStore>(registry: &mut RegionRegistry<S>, input: &Path, label: Option<&str>) -> Result<()> {
    let collection = FeatureCollection::read(input).with_context(|| format!("reading {}", input.display()))?;
    let hulls = polygon_hulls(&collection).with_context(|| format!("reading hulls from {}", input.display()))?;
    let mut added = 0;
    for labeled in hulls {
        let name = labeled.region.map(|l| l.name());
        if label.is_some() && name != label {
            continue;
        }
        registry.add_region(labeled.hull)?;
        added += 1;
    }
    println!("Added {} hull regions", added);
    Ok(())
}
