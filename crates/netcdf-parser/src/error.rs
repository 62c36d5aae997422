//! Error types for NetCDF parsing operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for NetCDF parser operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF parsing.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// The dataset file does not exist
    #[error("NetCDF file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Missing required variable or dimension
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format or incompatible shapes
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl From<ocean_common::GridError> for NetCdfError {
    fn from(err: ocean_common::GridError) -> Self {
        NetCdfError::InvalidFormat(err.to_string())
    }
}
