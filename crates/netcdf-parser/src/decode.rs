//! CF-convention decoding of packed and masked values.

/// Packing and masking attributes attached to a data variable.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PackingAttributes {
    pub fill_value: Option<f64>,
    pub missing_value: Option<f64>,
    pub scale_factor: Option<f64>,
    pub add_offset: Option<f64>,
}

impl PackingAttributes {
    /// True when decoding would leave every value unchanged.
    pub fn is_identity(&self) -> bool {
        self.fill_value.is_none()
            && self.missing_value.is_none()
            && self.scale_factor.is_none()
            && self.add_offset.is_none()
    }

    /// Decode a single raw value. Masked values become NaN.
    #[inline]
    pub fn decode_value(&self, raw: f64) -> f64 {
        if self.is_masked(raw) {
            return f64::NAN;
        }
        raw * self.scale_factor.unwrap_or(1.0) + self.add_offset.unwrap_or(0.0)
    }

    /// Decode raw values in place.
    pub fn decode_in_place(&self, values: &mut [f64]) {
        if self.is_identity() {
            return;
        }
        for value in values.iter_mut() {
            *value = self.decode_value(*value);
        }
    }

    fn is_masked(&self, raw: f64) -> bool {
        // Masks compare against the packed value, before scaling
        self.fill_value.is_some_and(|fill| raw == fill)
            || self.missing_value.is_some_and(|missing| raw == missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_leaves_values() {
        let attrs = PackingAttributes::default();
        let mut values = vec![0.1, f64::NAN, -2.5];
        attrs.decode_in_place(&mut values);
        assert_eq!(values[0], 0.1);
        assert!(values[1].is_nan());
        assert_eq!(values[2], -2.5);
    }

    #[test]
    fn test_fill_value_masked() {
        let attrs = PackingAttributes {
            fill_value: Some(-32767.0),
            ..Default::default()
        };
        assert!(attrs.decode_value(-32767.0).is_nan());
        assert_eq!(attrs.decode_value(12.0), 12.0);
    }

    #[test]
    fn test_scale_and_offset() {
        let attrs = PackingAttributes {
            fill_value: Some(-32767.0),
            scale_factor: Some(0.001),
            add_offset: Some(0.5),
            ..Default::default()
        };
        let decoded = attrs.decode_value(250.0);
        assert!((decoded - 0.75).abs() < 1e-12);
        assert!(attrs.decode_value(-32767.0).is_nan());
    }

    #[test]
    fn test_missing_value_masked() {
        let attrs = PackingAttributes {
            missing_value: Some(1e20),
            ..Default::default()
        };
        let mut values = vec![1e20, 0.3];
        attrs.decode_in_place(&mut values);
        assert!(values[0].is_nan());
        assert_eq!(values[1], 0.3);
    }
}
