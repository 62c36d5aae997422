//! Ocean currents grid to GeoJSON feature conversion.
//!
//! Loads a `uo`/`vo` currents grid, samples it at a stride, filters invalid
//! and out-of-box cells, caps the number of features, and produces a GeoJSON
//! `FeatureCollection` of points carrying `u`, `v` and `speed`.
//!
//! # Example
//!
//! ```rust
//! use current_features::{convert, ConversionOptions};
//! use ocean_common::{BoundingBox, VelocityGrid};
//!
//! let grid = VelocityGrid::from_rows(
//!     vec![10.0, 20.0],
//!     vec![5.0, 6.0],
//!     &[vec![1.0, 2.0], vec![3.0, f64::NAN]],
//!     &[vec![0.0, 0.0], vec![0.0, 0.0]],
//! )
//! .unwrap();
//!
//! let options = ConversionOptions::new()
//!     .with_bbox(Some(BoundingBox::new(15.0, 5.0, 25.0, 6.0)))
//!     .quiet();
//! let result = convert(&grid, &options).unwrap();
//! assert_eq!(result.total, 1);
//! ```

pub mod convert;
pub mod error;
pub mod geojson;
pub mod options;
pub mod output;
pub mod source;

// Re-exports
pub use convert::{convert, ConversionResult, GridToFeatureConverter};
pub use error::{ConversionError, Result};
pub use geojson::{
    round_property, CurrentFeature, CurrentFeatureCollection, CurrentProperties, PointGeometry,
};
pub use options::{ConversionOptions, DEFAULT_MAX_FEATURES, DEFAULT_PROGRESS_INTERVAL};
pub use output::{write_feature_collection, write_pretty};
pub use source::load_currents;
