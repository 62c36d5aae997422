//! Error types for the conversion pipeline.

use std::path::PathBuf;

use netcdf_parser::NetCdfError;
use ocean_common::GridError;
use thiserror::Error;

/// Errors that can occur while converting a currents grid.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The source dataset does not exist.
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Required variables are absent or shapes are incompatible.
    #[error("Input malformed: {0}")]
    InputMalformed(String),

    /// Conversion options failed validation.
    #[error("Invalid conversion options: {0}")]
    InvalidOptions(String),

    /// Writing the output artifact failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// Serializing the feature collection failed.
    #[error("Failed to serialize GeoJSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<NetCdfError> for ConversionError {
    fn from(err: NetCdfError) -> Self {
        match err {
            NetCdfError::NotFound(path) => ConversionError::InputNotFound(path),
            other => ConversionError::InputMalformed(other.to_string()),
        }
    }
}

impl From<GridError> for ConversionError {
    fn from(err: GridError) -> Self {
        ConversionError::InputMalformed(err.to_string())
    }
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConversionError>;
