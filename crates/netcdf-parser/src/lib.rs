//! NetCDF reader for gridded ocean current products.
//!
//! This crate reads regional current datasets (e.g. Copernicus Marine
//! `uo`/`vo` downloads) into an [`ocean_common::VelocityGrid`].
//!
//! # Dataset layout
//!
//! The reader expects 1-D `longitude` and `latitude` coordinate variables and
//! two velocity components whose trailing dimensions are
//! `latitude x longitude`. Every leading dimension (normally `time`, and
//! `depth` when present) is sliced at index 0.
//!
//! Packed values are unpacked with `scale_factor`/`add_offset`, and cells equal
//! to `_FillValue` or `missing_value` become NaN.

pub mod decode;
pub mod error;
pub mod native;

use std::path::Path;

use ocean_common::VelocityGrid;

pub use decode::PackingAttributes;
pub use error::{NetCdfError, NetCdfResult};
pub use native::silence_hdf5_errors;

/// Names of the variables to read from a currents dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableNames {
    pub longitude: String,
    pub latitude: String,
    /// Eastward velocity component
    pub u: String,
    /// Northward velocity component
    pub v: String,
}

impl Default for VariableNames {
    fn default() -> Self {
        Self {
            longitude: "longitude".to_string(),
            latitude: "latitude".to_string(),
            u: "uo".to_string(),
            v: "vo".to_string(),
        }
    }
}

/// A leading dimension that was collapsed by taking its first index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlicedDimension {
    pub name: String,
    pub len: usize,
}

/// A loaded currents grid plus a record of what was sliced away.
#[derive(Debug, Clone)]
pub struct CurrentsDataset {
    pub grid: VelocityGrid,
    pub sliced: Vec<SlicedDimension>,
}

/// Read a currents dataset using the default variable names.
pub fn read_currents<P: AsRef<Path>>(path: P) -> NetCdfResult<CurrentsDataset> {
    native::read_currents_file(path.as_ref(), &VariableNames::default())
}

/// Read a currents dataset with custom variable names.
pub fn read_currents_with<P: AsRef<Path>>(
    path: P,
    names: &VariableNames,
) -> NetCdfResult<CurrentsDataset> {
    native::read_currents_file(path.as_ref(), names)
}
