//! Common types shared by the ocean currents crates.

pub mod bbox;
pub mod error;
pub mod grid;

pub use bbox::{BboxParseError, BoundingBox};
pub use error::{GridError, GridResult};
pub use grid::{is_valid_component, GridCell, VelocityGrid};
