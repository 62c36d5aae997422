//! Converter configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use current_features::{ConversionOptions, DEFAULT_MAX_FEATURES};
use ocean_common::BoundingBox;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug, Clone)]
#[command(name = "currents-converter")]
#[command(about = "Convert ocean current NetCDF grids to GeoJSON point features")]
pub struct Args {
    /// Region name used to build the input and output file names
    #[arg(long, env = "CURRENTS_REGION", default_value = "northwest_russia")]
    pub region: String,

    /// Take every Nth row and column
    #[arg(long, default_value_t = 1)]
    pub stride: usize,

    /// Bounding box filter: lon_min,lat_min,lon_max,lat_max
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub bbox: String,

    /// Maximum number of features to write
    #[arg(long, default_value_t = DEFAULT_MAX_FEATURES)]
    pub max_features: usize,

    /// Suppress start and progress messages
    #[arg(long)]
    pub quiet: bool,

    /// Directory holding `{region}_currents.nc`
    #[arg(long, env = "CURRENTS_INPUT_DIR", default_value = "downloads")]
    pub input_dir: PathBuf,

    /// Directory receiving `{region}_currents.geojson`
    #[arg(long, env = "CURRENTS_OUTPUT_DIR", default_value = "src/assets")]
    pub output_dir: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

/// Resolved settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConverterConfig {
    pub region: String,

    /// Source NetCDF dataset
    pub input_path: PathBuf,

    /// Destination GeoJSON file
    pub output_path: PathBuf,

    pub options: ConversionOptions,

    /// Suppress start and progress messages
    pub quiet: bool,
}

impl ConverterConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        let bbox = BoundingBox::parse_optional(&args.bbox)
            .with_context(|| format!("Invalid --bbox value {:?}", args.bbox))?;

        let mut options = ConversionOptions::new()
            .with_stride(args.stride)
            .with_bbox(bbox)
            .with_max_features(args.max_features);
        if args.quiet {
            options = options.quiet();
        }
        options.validate()?;

        Ok(Self {
            region: args.region.clone(),
            input_path: input_path(&args.input_dir, &args.region),
            output_path: output_path(&args.output_dir, &args.region),
            options,
            quiet: args.quiet,
        })
    }
}

pub fn input_path(dir: &Path, region: &str) -> PathBuf {
    dir.join(format!("{}_currents.nc", region))
}

pub fn output_path(dir: &Path, region: &str) -> PathBuf {
    dir.join(format!("{}_currents.geojson", region))
}
