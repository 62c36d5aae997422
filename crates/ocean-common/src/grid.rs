//! Velocity grids on a regular longitude/latitude lattice.

use crate::error::{GridError, GridResult};

/// Returns true when a velocity component holds a usable value.
///
/// Decoded fill values arrive as NaN; infinities are rejected as well.
#[inline]
pub fn is_valid_component(value: f64) -> bool {
    value.is_finite()
}

/// A 2-D ocean current grid with its coordinate axes.
///
/// `u` and `v` are stored row-major: row `i` maps to `latitudes[i]`,
/// column `j` maps to `longitudes[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityGrid {
    longitudes: Vec<f64>,
    latitudes: Vec<f64>,
    u: Vec<f64>,
    v: Vec<f64>,
}

impl VelocityGrid {
    /// Build a grid, checking that both components match the coordinate lengths.
    pub fn new(
        longitudes: Vec<f64>,
        latitudes: Vec<f64>,
        u: Vec<f64>,
        v: Vec<f64>,
    ) -> GridResult<Self> {
        let rows = latitudes.len();
        let cols = longitudes.len();
        let expected = rows
            .checked_mul(cols)
            .ok_or(GridError::TooLarge { rows, cols })?;

        if u.len() != expected {
            return Err(GridError::ShapeMismatch {
                name: "u",
                expected,
                found: u.len(),
            });
        }
        if v.len() != expected {
            return Err(GridError::ShapeMismatch {
                name: "v",
                expected,
                found: v.len(),
            });
        }

        Ok(Self {
            longitudes,
            latitudes,
            u,
            v,
        })
    }

    /// Build a grid from nested rows, e.g. `u[i][j]`.
    pub fn from_rows(
        longitudes: Vec<f64>,
        latitudes: Vec<f64>,
        u: &[Vec<f64>],
        v: &[Vec<f64>],
    ) -> GridResult<Self> {
        let cols = longitudes.len();
        for (name, rows) in [("u", u), ("v", v)] {
            if let Some(row) = rows.iter().find(|row| row.len() != cols) {
                return Err(GridError::ShapeMismatch {
                    name,
                    expected: cols,
                    found: row.len(),
                });
            }
        }
        Self::new(longitudes, latitudes, u.concat(), v.concat())
    }

    /// Number of rows (latitude points).
    pub fn rows(&self) -> usize {
        self.latitudes.len()
    }

    /// Number of columns (longitude points).
    pub fn cols(&self) -> usize {
        self.longitudes.len()
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.u.len()
    }

    pub fn is_empty(&self) -> bool {
        self.u.is_empty()
    }

    pub fn longitudes(&self) -> &[f64] {
        &self.longitudes
    }

    pub fn latitudes(&self) -> &[f64] {
        &self.latitudes
    }

    /// Read one cell. Returns None when out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<GridCell> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        let idx = row * self.cols() + col;
        Some(GridCell {
            row,
            col,
            lon: self.longitudes[col],
            lat: self.latitudes[row],
            u: self.u[idx],
            v: self.v[idx],
        })
    }

    /// Iterate cells at the given stride in row-major order.
    ///
    /// Only rows and columns whose index is a multiple of `stride` are
    /// visited. A stride of 0 is treated as 1.
    pub fn sampled_cells(&self, stride: usize) -> impl Iterator<Item = GridCell> + '_ {
        let stride = stride.max(1);
        let cols = self.cols();
        (0..self.rows()).step_by(stride).flat_map(move |row| {
            (0..cols).step_by(stride).map(move |col| {
                let idx = row * cols + col;
                GridCell {
                    row,
                    col,
                    lon: self.longitudes[col],
                    lat: self.latitudes[row],
                    u: self.u[idx],
                    v: self.v[idx],
                }
            })
        })
    }
}

/// A single grid cell with its position and velocity components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    pub lon: f64,
    pub lat: f64,
    pub u: f64,
    pub v: f64,
}

impl GridCell {
    /// Both components are valid numbers.
    pub fn is_valid(&self) -> bool {
        is_valid_component(self.u) && is_valid_component(self.v)
    }

    /// Current speed, `sqrt(u² + v²)`.
    pub fn speed(&self) -> f64 {
        (self.u * self.u + self.v * self.v).sqrt()
    }
}
