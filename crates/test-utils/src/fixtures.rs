//! Common test fixtures for the ocean currents workspace.
//!
//! Besides a few reference bounding boxes, this module can write small but
//! real NetCDF currents files shaped like regional Copernicus Marine
//! downloads: `time`, optional `depth`, then `latitude x longitude`.

use std::path::Path;

/// Common bounding box definitions for testing, as
/// `(lon_min, lat_min, lon_max, lat_max)`.
pub mod bbox {
    /// Global bounding box (-180 to 180, -90 to 90)
    pub const GLOBAL: (f64, f64, f64, f64) = (-180.0, -90.0, 180.0, 90.0);

    /// Barents and White Sea approach, the default region's extent
    pub const NORTHWEST_RUSSIA: (f64, f64, f64, f64) = (27.0, 64.0, 45.0, 72.0);

    /// Single point (degenerate bbox)
    pub const POINT: (f64, f64, f64, f64) = (0.0, 0.0, 0.0, 0.0);

    /// Invalid bbox (min > max)
    pub const INVALID: (f64, f64, f64, f64) = (10.0, 10.0, 5.0, 5.0);
}

/// Packed i16 fill value used by [`CurrentsFixture::packed`].
pub const PACKED_FILL_VALUE: i16 = -32767;

/// Offset added to velocities on every level except the first, so tests can
/// tell whether the reader sliced index 0.
pub const DEEP_LEVEL_OFFSET: f32 = 100.0;

/// How the velocity components are stored on disk.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Storage {
    /// f32 values, NaN written as-is
    Float,
    /// f32 values, NaN replaced with a `_FillValue`
    FloatWithFill(f32),
    /// i16 values with `scale_factor`/`add_offset`, NaN becomes `PACKED_FILL_VALUE`
    Packed { scale_factor: f64, add_offset: f64 },
}

/// Builder for a NetCDF currents file.
///
/// `u` and `v` hold the surface slab in row-major order (`latitudes.len()`
/// rows by `longitudes.len()` columns).
#[derive(Debug, Clone)]
pub struct CurrentsFixture {
    pub longitudes: Vec<f32>,
    pub latitudes: Vec<f32>,
    pub u: Vec<f32>,
    pub v: Vec<f32>,
    time_steps: usize,
    depth_levels: Option<usize>,
    storage: Storage,
    u_name: String,
    v_name: String,
}

impl CurrentsFixture {
    /// Create a fixture with one time step and no depth dimension.
    pub fn new(longitudes: Vec<f32>, latitudes: Vec<f32>, u: Vec<f32>, v: Vec<f32>) -> Self {
        Self {
            longitudes,
            latitudes,
            u,
            v,
            time_steps: 1,
            depth_levels: None,
            storage: Storage::Float,
            u_name: "uo".to_string(),
            v_name: "vo".to_string(),
        }
    }

    /// The 2x2 grid used throughout the converter tests:
    /// lons `[10, 20]`, lats `[5, 6]`, `u = [[1, 2], [3, NaN]]`, `v = 0`.
    pub fn two_by_two() -> Self {
        Self::new(
            vec![10.0, 20.0],
            vec![5.0, 6.0],
            vec![1.0, 2.0, 3.0, f32::NAN],
            vec![0.0, 0.0, 0.0, 0.0],
        )
    }

    pub fn with_time_steps(mut self, steps: usize) -> Self {
        self.time_steps = steps.max(1);
        self
    }

    pub fn with_depth_levels(mut self, levels: usize) -> Self {
        self.depth_levels = Some(levels.max(1));
        self
    }

    /// Store NaN cells as the given `_FillValue`.
    pub fn with_fill_value(mut self, fill: f32) -> Self {
        self.storage = Storage::FloatWithFill(fill);
        self
    }

    /// Store components as packed i16.
    pub fn packed(mut self, scale_factor: f64, add_offset: f64) -> Self {
        self.storage = Storage::Packed {
            scale_factor,
            add_offset,
        };
        self
    }

    /// Rename the velocity variables (to simulate malformed inputs).
    pub fn with_component_names(mut self, u: &str, v: &str) -> Self {
        self.u_name = u.to_string();
        self.v_name = v.to_string();
        self
    }

    /// Write the fixture to `path`.
    pub fn write(&self, path: &Path) -> Result<(), netcdf::Error> {
        let mut file = netcdf::create(path)?;
        file.add_attribute("title", "Synthetic ocean currents fixture")?;

        file.add_dimension("time", self.time_steps)?;
        if let Some(levels) = self.depth_levels {
            file.add_dimension("depth", levels)?;
        }
        file.add_dimension("latitude", self.latitudes.len())?;
        file.add_dimension("longitude", self.longitudes.len())?;

        {
            let mut lon_var = file.add_variable::<f32>("longitude", &["longitude"])?;
            lon_var.put_attribute("units", "degrees_east")?;
            lon_var.put_values(&self.longitudes, ..)?;
        }
        {
            let mut lat_var = file.add_variable::<f32>("latitude", &["latitude"])?;
            lat_var.put_attribute("units", "degrees_north")?;
            lat_var.put_values(&self.latitudes, ..)?;
        }
        {
            let times: Vec<f64> = (0..self.time_steps).map(|t| t as f64 * 24.0).collect();
            let mut time_var = file.add_variable::<f64>("time", &["time"])?;
            time_var.put_attribute("units", "hours since 2024-01-01 00:00:00")?;
            time_var.put_values(&times, ..)?;
        }
        if let Some(levels) = self.depth_levels {
            let depths: Vec<f32> = (0..levels).map(|d| 0.5 + d as f32 * 10.0).collect();
            let mut depth_var = file.add_variable::<f32>("depth", &["depth"])?;
            depth_var.put_attribute("units", "m")?;
            depth_var.put_values(&depths, ..)?;
        }

        let dims = self.component_dims();
        self.write_component(&mut file, &self.u_name, &dims, &self.u)?;
        self.write_component(&mut file, &self.v_name, &dims, &self.v)?;

        Ok(())
    }

    fn component_dims(&self) -> Vec<&'static str> {
        let mut dims = vec!["time"];
        if self.depth_levels.is_some() {
            dims.push("depth");
        }
        dims.extend(["latitude", "longitude"]);
        dims
    }

    /// Repeat the surface slab over every time/depth level. Only the first
    /// slab keeps the original values.
    fn expand_levels(&self, surface: &[f32]) -> Vec<f32> {
        let levels = self.time_steps * self.depth_levels.unwrap_or(1);
        let mut data = Vec::with_capacity(surface.len() * levels);
        for level in 0..levels {
            let offset = if level == 0 { 0.0 } else { DEEP_LEVEL_OFFSET };
            data.extend(surface.iter().map(|value| value + offset));
        }
        data
    }

    fn write_component(
        &self,
        file: &mut netcdf::FileMut,
        name: &str,
        dims: &[&str],
        surface: &[f32],
    ) -> Result<(), netcdf::Error> {
        let data = self.expand_levels(surface);
        match self.storage {
            Storage::Float => {
                let mut var = file.add_variable::<f32>(name, dims)?;
                var.put_attribute("units", "m s-1")?;
                var.put_values(&data, ..)?;
            }
            Storage::FloatWithFill(fill) => {
                let filled: Vec<f32> = data
                    .iter()
                    .map(|&value| if value.is_nan() { fill } else { value })
                    .collect();
                let mut var = file.add_variable::<f32>(name, dims)?;
                var.put_attribute("_FillValue", fill)?;
                var.put_attribute("units", "m s-1")?;
                var.put_values(&filled, ..)?;
            }
            Storage::Packed {
                scale_factor,
                add_offset,
            } => {
                let packed: Vec<i16> = data
                    .iter()
                    .map(|&value| {
                        if value.is_nan() {
                            PACKED_FILL_VALUE
                        } else {
                            ((value as f64 - add_offset) / scale_factor).round() as i16
                        }
                    })
                    .collect();
                let mut var = file.add_variable::<i16>(name, dims)?;
                var.put_attribute("_FillValue", PACKED_FILL_VALUE)?;
                var.put_attribute("scale_factor", scale_factor)?;
                var.put_attribute("add_offset", add_offset)?;
                var.put_attribute("units", "m s-1")?;
                var.put_values(&packed, ..)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_dims_with_depth() {
        let fixture = CurrentsFixture::two_by_two().with_depth_levels(3);
        assert_eq!(
            fixture.component_dims(),
            vec!["time", "depth", "latitude", "longitude"]
        );
    }

    #[test]
    fn test_expand_levels_marks_deeper_slabs() {
        let fixture = CurrentsFixture::two_by_two().with_time_steps(2);
        let data = fixture.expand_levels(&[1.0, 2.0]);
        assert_eq!(data, vec![1.0, 2.0, 101.0, 102.0]);
    }
}
