//! Conversion parameters.

use ocean_common::BoundingBox;
use serde::{Deserialize, Serialize};

use crate::error::{ConversionError, Result};

/// Default cap on emitted features.
pub const DEFAULT_MAX_FEATURES: usize = 10_000;

/// Default number of features between progress reports.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 1000;

/// Parameters for a single grid-to-feature conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// Sampling step in both row and column directions (>= 1).
    pub stride: usize,

    /// Optional inclusive spatial filter.
    pub bbox: Option<BoundingBox>,

    /// Hard ceiling on emitted features.
    pub max_features: usize,

    /// Report progress every N emitted features. `None` disables reporting.
    pub progress_interval: Option<usize>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            stride: 1,
            bbox: None,
            max_features: DEFAULT_MAX_FEATURES,
            progress_interval: Some(DEFAULT_PROGRESS_INTERVAL),
        }
    }
}

impl ConversionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    pub fn with_bbox(mut self, bbox: Option<BoundingBox>) -> Self {
        self.bbox = bbox;
        self
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn with_progress_interval(mut self, interval: Option<usize>) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Disable progress reporting.
    pub fn quiet(self) -> Self {
        self.with_progress_interval(None)
    }

    /// Validate the options.
    pub fn validate(&self) -> Result<()> {
        if self.stride == 0 {
            return Err(ConversionError::InvalidOptions(
                "stride must be at least 1".to_string(),
            ));
        }
        if self.progress_interval == Some(0) {
            return Err(ConversionError::InvalidOptions(
                "progress interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ConversionOptions::default();
        assert_eq!(options.stride, 1);
        assert_eq!(options.bbox, None);
        assert_eq!(options.max_features, 10_000);
        assert_eq!(options.progress_interval, Some(1000));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_zero_stride_rejected() {
        let options = ConversionOptions::new().with_stride(0);
        assert!(matches!(
            options.validate(),
            Err(ConversionError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_quiet_disables_progress() {
        let options = ConversionOptions::new().quiet();
        assert_eq!(options.progress_interval, None);
    }

    #[test]
    fn test_zero_cap_is_valid() {
        assert!(ConversionOptions::new().with_max_features(0).validate().is_ok());
    }
}
