//! CLI for convex-hull summaries and affected-region queries.
//!
//! Provides:
//! - Interior/exterior convex hulls of a labeled GeoJSON point file
//! - Synthetic donut-shaped point clouds for trying the pipeline out
//! - A file-backed affected-region registry: add, remove, list, check
//!
//! Coordinates are always longitude, then latitude.

mod commands;
mod generate;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};

use regionmap_core::parse_log_level;

#[derive(Parser)]
#[command(name = "regionmap")]
#[command(about = "Convex-hull summaries and affected-region queries", long_about = None)]
struct Cli {
    /// Log level (off, error, warn, info, debug, trace); defaults to RUST_LOG, then info
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute interior and exterior convex hulls of a labeled point file
    Hull {
        /// GeoJSON FeatureCollection of points with a `region` property
        input: PathBuf,

        /// Directory for interior_hull.geojson / exterior_hull.geojson
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Generate a donut-shaped labeled point cloud
    Generate {
        /// Output GeoJSON file
        output: PathBuf,

        /// Center latitude
        #[arg(long, default_value = "12.8406", allow_negative_numbers = true)]
        center_lat: f64,

        /// Center longitude
        #[arg(long, default_value = "80.1534", allow_negative_numbers = true)]
        center_lon: f64,

        /// Radius of the interior disk, in meters
        #[arg(long, default_value = "1750")]
        inner_radius: f64,

        /// Outer radius of the exterior ring, in meters
        #[arg(long, default_value = "4000")]
        outer_radius: f64,

        /// Total number of points
        #[arg(short, long, default_value = "15000")]
        count: usize,

        /// Fraction of points inside the inner radius
        #[arg(long, default_value = "0.3")]
        interior_ratio: f64,

        /// RNG seed, for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Manage and query the affected-region registry
    Region {
        /// Root directory of the file-backed store
        #[arg(long, default_value = ".")]
        store_dir: PathBuf,

        /// Registry config (JSON: database, collection, documentId, deadlineMs)
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(subcommand)]
        command: RegionCommand,
    },
}

#[derive(Subcommand)]
pub enum RegionCommand {
    /// Add a rectangle given by two opposite corners
    Add(Corners),

    /// Remove the first rectangle equal to the one given
    Remove(Corners),

    /// Add the polygon features of a GeoJSON file (e.g. hull output) as regions
    AddHull {
        input: PathBuf,

        /// Only add features with this `region` label
        #[arg(long)]
        region: Option<String>,
    },

    /// Print whether a point lies in any affected region
    Check {
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
    },

    /// List affected regions in storage order
    List,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct Corners {
    #[arg(allow_negative_numbers = true)]
    lon1: f64,
    #[arg(allow_negative_numbers = true)]
    lat1: f64,
    #[arg(allow_negative_numbers = true)]
    lon2: f64,
    #[arg(allow_negative_numbers = true)]
    lat2: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = cli.log_level.as_deref() {
        let filter = parse_log_level(Some(level)).ok_or_else(|| anyhow!("invalid log level: {}", level))?;
        logger.filter_level(filter);
    }
    logger.init();

    match cli.command {
        Commands::Hull { input, out_dir } => commands::hull(&input, &out_dir),
        Commands::Generate {
            output,
            center_lat,
            center_lon,
            inner_radius,
            outer_radius,
            count,
            interior_ratio,
            seed,
        } => {
            let config = generate::DonutConfig {
                center: regionmap_core::R2 { x: center_lon, y: center_lat },
                inner_radius,
                outer_radius,
                count,
                interior_ratio,
            };
            commands::generate(&config, seed, &output)
        }
        Commands::Region { store_dir, config, command } => commands::region(&store_dir, config.as_deref(), command),
    }
}
