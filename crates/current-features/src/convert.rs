//! Grid traversal and feature emission.

use std::time::{Duration, Instant};

use ocean_common::VelocityGrid;
use tracing::{debug, info};

use crate::error::Result;
use crate::geojson::{CurrentFeature, CurrentFeatureCollection};
use crate::options::ConversionOptions;

/// Output of a conversion run.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// Emitted features in traversal order.
    pub collection: CurrentFeatureCollection,

    /// Number of emitted features.
    pub total: usize,

    /// Number of sampled cells looked at before traversal ended.
    pub examined: usize,

    /// Wall time spent in traversal.
    pub elapsed: Duration,
}

/// Converts a velocity grid into GeoJSON point features.
///
/// Cells are visited row-major at `stride`. A cell is skipped when either
/// component is invalid or when it falls outside the bounding box.
/// Traversal stops as soon as `max_features` features have been emitted.
#[derive(Debug, Clone)]
pub struct GridToFeatureConverter {
    options: ConversionOptions,
}

impl GridToFeatureConverter {
    /// Create a converter, validating the options.
    pub fn new(options: ConversionOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Convert the grid, logging progress through `tracing`.
    pub fn convert(&self, grid: &VelocityGrid) -> ConversionResult {
        self.convert_with_progress(grid, |emitted| {
            info!(emitted = emitted, "Features written so far");
        })
    }

    /// Convert the grid, calling `on_progress` with the cumulative count
    /// every `progress_interval` emitted features.
    pub fn convert_with_progress<F>(&self, grid: &VelocityGrid, mut on_progress: F) -> ConversionResult
    where
        F: FnMut(usize),
    {
        let start = Instant::now();
        let ConversionOptions {
            stride,
            bbox,
            max_features,
            progress_interval,
        } = self.options;

        let candidates = grid.rows().div_ceil(stride) * grid.cols().div_ceil(stride);
        let mut features = Vec::with_capacity(candidates.min(max_features));
        let mut examined = 0;

        debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            stride = stride,
            candidates = candidates,
            max_features = max_features,
            bbox = ?bbox,
            "Starting grid traversal"
        );

        if max_features > 0 {
            for cell in grid.sampled_cells(stride) {
                examined += 1;

                if !cell.is_valid() {
                    continue;
                }
                if let Some(bbox) = &bbox {
                    if !bbox.contains_point(cell.lon, cell.lat) {
                        continue;
                    }
                }

                features.push(CurrentFeature::from_cell(&cell));
                let total = features.len();

                if let Some(interval) = progress_interval {
                    if total % interval == 0 {
                        on_progress(total);
                    }
                }

                if total >= max_features {
                    debug!(examined = examined, "Feature cap reached");
                    break;
                }
            }
        }

        let total = features.len();
        ConversionResult {
            collection: CurrentFeatureCollection::from_features(features),
            total,
            examined,
            elapsed: start.elapsed(),
        }
    }
}

/// Convert a grid with the given options.
pub fn convert(grid: &VelocityGrid, options: &ConversionOptions) -> Result<ConversionResult> {
    let converter = GridToFeatureConverter::new(options.clone())?;
    Ok(converter.convert(grid))
}
