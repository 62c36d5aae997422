//! GeoJSON types for ocean current point features.
//!
//! Each feature is a Point at a grid cell with the current components and
//! speed as properties:
//!
//! ```json
//! { "type": "Feature",
//!   "geometry": { "type": "Point", "coordinates": [lon, lat] },
//!   "properties": { "u": 0.12, "v": -0.034, "speed": 0.125 } }
//! ```

use ocean_common::GridCell;
use serde::{Deserialize, Serialize};

/// Number of decimal places kept for u, v and speed.
pub const PROPERTY_DECIMALS: usize = 3;

/// Round to [`PROPERTY_DECIMALS`] places.
///
/// Rounds the exact binary value through its decimal representation, so
/// `0.1235` (stored just below the tie) becomes `0.123`.
pub fn round_property(value: f64) -> f64 {
    format!("{:.*}", PROPERTY_DECIMALS, value)
        .parse()
        .unwrap_or(value)
}

/// A GeoJSON FeatureCollection of current vectors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentFeatureCollection {
    /// Type identifier (always "FeatureCollection").
    #[serde(rename = "type")]
    pub type_: String,

    /// Features in grid traversal order.
    pub features: Vec<CurrentFeature>,
}

impl CurrentFeatureCollection {
    /// Create a new empty FeatureCollection.
    pub fn new() -> Self {
        Self {
            type_: "FeatureCollection".to_string(),
            features: Vec::new(),
        }
    }

    /// Create a collection from already-built features.
    pub fn from_features(features: Vec<CurrentFeature>) -> Self {
        Self {
            type_: "FeatureCollection".to_string(),
            features,
        }
    }

    /// Add a feature to the collection.
    pub fn with_feature(mut self, feature: CurrentFeature) -> Self {
        self.features.push(feature);
        self
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl Default for CurrentFeatureCollection {
    fn default() -> Self {
        Self::new()
    }
}

/// A GeoJSON Feature for one grid cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentFeature {
    /// Type identifier (always "Feature").
    #[serde(rename = "type")]
    pub type_: String,

    pub geometry: PointGeometry,

    pub properties: CurrentProperties,
}

impl CurrentFeature {
    /// Create a feature at `(lon, lat)` with unrounded components.
    ///
    /// Speed is derived from the raw components, then all three values are
    /// rounded.
    pub fn new(lon: f64, lat: f64, u: f64, v: f64) -> Self {
        Self {
            type_: "Feature".to_string(),
            geometry: PointGeometry::point(lon, lat),
            properties: CurrentProperties::from_components(u, v),
        }
    }

    /// Create a feature from a grid cell.
    pub fn from_cell(cell: &GridCell) -> Self {
        Self::new(cell.lon, cell.lat, cell.u, cell.v)
    }

    /// Longitude and latitude of the point.
    pub fn position(&self) -> (f64, f64) {
        match self.geometry {
            PointGeometry::Point { coordinates } => (coordinates[0], coordinates[1]),
        }
    }
}

/// GeoJSON geometry. Only points are produced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum PointGeometry {
    Point {
        /// Coordinates as [longitude, latitude].
        coordinates: [f64; 2],
    },
}

impl PointGeometry {
    pub fn point(lon: f64, lat: f64) -> Self {
        PointGeometry::Point {
            coordinates: [lon, lat],
        }
    }
}

/// Current components and speed, rounded for output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CurrentProperties {
    /// Eastward velocity (m/s).
    pub u: f64,
    /// Northward velocity (m/s).
    pub v: f64,
    /// Current speed, `sqrt(u² + v²)` (m/s).
    pub speed: f64,
}

impl CurrentProperties {
    pub fn from_components(u: f64, v: f64) -> Self {
        let speed = (u * u + v * v).sqrt();
        Self {
            u: round_property(u),
            v: round_property(v),
            speed: round_property(speed),
        }
    }
}
