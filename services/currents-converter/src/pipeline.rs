//! Load, convert and write one region.

use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use current_features::{
    load_currents, write_feature_collection, ConversionError, GridToFeatureConverter,
};
use netcdf_parser::VariableNames;
use ocean_common::VelocityGrid;
use tracing::info;

use crate::config::ConverterConfig;

/// Completion report for a run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub total: usize,

    /// Conversion plus output time; dataset loading is not included.
    pub elapsed: Duration,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Saved: {}", self.output_path.display())?;
        writeln!(f, "Total features: {}", self.total)?;
        write!(f, "Elapsed: {:.2} s", self.elapsed.as_secs_f64())
    }
}

/// Run the conversion described by `config`.
///
/// A missing input fails before the output directory is touched, and the
/// output file only appears once the collection has been fully written.
pub fn run(config: &ConverterConfig) -> Result<RunSummary> {
    if !config.input_path.exists() {
        return Err(ConversionError::InputNotFound(config.input_path.clone()).into());
    }

    let converter = GridToFeatureConverter::new(config.options.clone())?;

    if !config.quiet {
        info!(
            region = %config.region,
            input = %config.input_path.display(),
            "Reading NetCDF file"
        );
    }

    let dataset = load_currents(&config.input_path, &VariableNames::default())
        .with_context(|| format!("Failed to load {}", config.input_path.display()))?;

    convert_and_write(config, &converter, &dataset.grid)
}

/// Convert an already loaded grid and persist it. The reported elapsed time
/// starts here.
pub fn convert_and_write(
    config: &ConverterConfig,
    converter: &GridToFeatureConverter,
    grid: &VelocityGrid,
) -> Result<RunSummary> {
    let start = Instant::now();
    let result = converter.convert(grid);
    info!(
        total = result.total,
        examined = result.examined,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "Conversion finished"
    );

    let bytes = write_feature_collection(&result.collection, &config.output_path)
        .with_context(|| format!("Failed to write {}", config.output_path.display()))?;
    info!(path = %config.output_path.display(), bytes = bytes, "Wrote GeoJSON");

    Ok(RunSummary {
        output_path: config.output_path.clone(),
        total: result.total,
        elapsed: start.elapsed(),
    })
}
