//! Error types for grid construction.

use thiserror::Error;

/// Result type alias using GridError.
pub type GridResult<T> = Result<T, GridError>;

/// Structural problems with a velocity grid.
#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("Shape mismatch for {name}: expected {expected} values, found {found}")]
    ShapeMismatch {
        name: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Grid too large: {rows} x {cols}")]
    TooLarge { rows: usize, cols: usize },
}
