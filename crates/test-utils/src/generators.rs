//! Test data generators for synthetic ocean current grids.
//!
//! These generators create predictable, verifiable patterns. All grids are
//! row-major: row 0 first, each row holding one latitude.

use ocean_common::VelocityGrid;

/// Evenly spaced axis values: `start, start + step, ...` (`n` values).
pub fn create_axis(start: f64, step: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Creates an eastward (u) current component that varies by latitude.
///
/// Values range from -0.8 to +0.8 m/s, a coastal-jet-like shear.
pub fn create_eastward_current_grid(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        let lat_factor = (row as f64 / height.max(1) as f64 - 0.5) * 2.0;
        for _col in 0..width {
            data.push(lat_factor * 0.8);
        }
    }
    data
}

/// Creates a northward (v) current component that varies by longitude.
///
/// Values range from -0.5 to +0.5 m/s.
pub fn create_northward_current_grid(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for _row in 0..height {
        for col in 0..width {
            let lon_factor = (col as f64 / width.max(1) as f64 - 0.5) * 2.0;
            data.push(lon_factor * 0.5);
        }
    }
    data
}

/// Creates a grid with NaN values at specified positions.
///
/// `nan_positions` holds `(col, row)` pairs; all other cells are 0.
pub fn create_grid_with_nans(
    width: usize,
    height: usize,
    nan_positions: &[(usize, usize)],
) -> Vec<f64> {
    let mut data = vec![0.0; width * height];
    for &(col, row) in nan_positions {
        if col < width && row < height {
            data[row * width + col] = f64::NAN;
        }
    }
    data
}

/// Applies a deterministic land mask: roughly one cell in `1/land_ratio`
/// becomes NaN in both components.
///
/// Uses a simple hash so the mask is reproducible for a given seed.
pub fn apply_land_mask(u: &mut [f64], v: &mut [f64], width: usize, seed: u32, land_ratio: u32) {
    let land_ratio = land_ratio.max(1);
    for (idx, (u_val, v_val)) in u.iter_mut().zip(v.iter_mut()).enumerate() {
        let col = (idx % width.max(1)) as u32;
        let row = (idx / width.max(1)) as u32;
        if simple_hash(col, row, seed) % land_ratio == 0 {
            *u_val = f64::NAN;
            *v_val = f64::NAN;
        }
    }
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

/// Builds a full velocity grid over a regular lattice starting at
/// `(lon0, lat0)` with the given spacing, using the shear patterns above.
pub fn create_current_field(
    width: usize,
    height: usize,
    lon0: f64,
    lat0: f64,
    spacing: f64,
) -> VelocityGrid {
    VelocityGrid::new(
        create_axis(lon0, spacing, width),
        create_axis(lat0, spacing, height),
        create_eastward_current_grid(width, height),
        create_northward_current_grid(width, height),
    )
    .expect("generated axes match generated components")
}

/// Same as [`create_current_field`] with a reproducible land mask applied.
pub fn create_masked_current_field(
    width: usize,
    height: usize,
    seed: u32,
    land_ratio: u32,
) -> VelocityGrid {
    let mut u = create_eastward_current_grid(width, height);
    let mut v = create_northward_current_grid(width, height);
    apply_land_mask(&mut u, &mut v, width, seed, land_ratio);
    VelocityGrid::new(
        create_axis(27.0, 0.25, width),
        create_axis(64.0, 0.25, height),
        u,
        v,
    )
    .expect("generated axes match generated components")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_axis() {
        assert_eq!(create_axis(10.0, 0.5, 3), vec![10.0, 10.5, 11.0]);
    }

    #[test]
    fn test_grid_with_nans() {
        let data = create_grid_with_nans(3, 2, &[(1, 1), (5, 5)]);
        assert!(data[4].is_nan());
        assert_eq!(data.iter().filter(|v| v.is_nan()).count(), 1);
    }

    #[test]
    fn test_land_mask_is_deterministic() {
        let first = create_masked_current_field(20, 10, 7, 4);
        let second = create_masked_current_field(20, 10, 7, 4);
        let invalid = |g: &VelocityGrid| g.sampled_cells(1).filter(|c| !c.is_valid()).count();
        assert_eq!(invalid(&first), invalid(&second));
        assert!(invalid(&first) > 0);
    }

    #[test]
    fn test_current_field_shape() {
        let grid = create_current_field(8, 4, 30.0, 65.0, 0.5);
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.cols(), 8);
        assert_eq!(grid.latitudes()[3], 66.5);
    }
}
