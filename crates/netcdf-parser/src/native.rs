//! Native NetCDF reading using the netcdf library.
//!
//! Opens a currents dataset, reads the 1-D coordinate axes and extracts the
//! first time/depth slab of each velocity component. Packed and masked values
//! are decoded following CF conventions before the grid is built.

use std::path::Path;
use std::sync::Once;

use ocean_common::VelocityGrid;
use tracing::{debug, info};

use crate::decode::PackingAttributes;
use crate::error::{NetCdfError, NetCdfResult};
use crate::{CurrentsDataset, SlicedDimension, VariableNames};

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints diagnostics even when a missing optional
/// attribute is handled on the Rust side. Call before any NetCDF access;
/// repeated calls are no-ops.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 accepts null handlers to disable error output.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Read an ocean currents dataset from a NetCDF file.
pub fn read_currents_file(path: &Path, names: &VariableNames) -> NetCdfResult<CurrentsDataset> {
    if !path.exists() {
        return Err(NetCdfError::NotFound(path.to_path_buf()));
    }

    silence_hdf5_errors();

    let nc_file = netcdf::open(path)
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to open NetCDF: {}", e)))?;

    let longitudes = read_axis(&nc_file, &names.longitude)?;
    let latitudes = read_axis(&nc_file, &names.latitude)?;
    let rows = latitudes.len();
    let cols = longitudes.len();

    let u_var = nc_file
        .variable(&names.u)
        .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", names.u)))?;
    let v_var = nc_file
        .variable(&names.v)
        .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", names.v)))?;

    let sliced = check_component_shape(&u_var, &names.u, rows, cols)?;
    let v_sliced = check_component_shape(&v_var, &names.v, rows, cols)?;
    if sliced != v_sliced {
        return Err(NetCdfError::InvalidFormat(format!(
            "{} and {} have different leading dimensions",
            names.u, names.v
        )));
    }

    for dim in sliced.iter().filter(|d| d.len > 1) {
        debug!(dimension = %dim.name, levels = dim.len, "Using first index of multi-level dimension");
    }

    let u = read_component(&u_var, &names.u, rows * cols)?;
    let v = read_component(&v_var, &names.v, rows * cols)?;

    let grid = VelocityGrid::new(longitudes, latitudes, u, v)?;

    info!(
        path = %path.display(),
        rows = rows,
        cols = cols,
        sliced = ?sliced.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
        "Loaded currents grid"
    );

    Ok(CurrentsDataset { grid, sliced })
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Read values of any common numeric storage type, widened to f64.
macro_rules! get_as_f64 {
    ($var:expr, $extents:expr) => {
        $var.get_values::<f64, _>($extents)
            .or_else(|_| $var.get_values::<f32, _>($extents).map(widen))
            .or_else(|_| $var.get_values::<i32, _>($extents).map(widen))
            .or_else(|_| $var.get_values::<i16, _>($extents).map(widen))
    };
}

fn widen<T: Into<f64>>(values: Vec<T>) -> Vec<f64> {
    values.into_iter().map(Into::into).collect()
}

/// Read a 1-D coordinate variable as f64.
fn read_axis(nc_file: &netcdf::File, name: &str) -> NetCdfResult<Vec<f64>> {
    let var = nc_file
        .variable(name)
        .ok_or_else(|| NetCdfError::MissingData(format!("{} coordinate", name)))?;

    let ndims = var.dimensions().len();
    if ndims != 1 {
        return Err(NetCdfError::InvalidFormat(format!(
            "{} coordinate must be 1-D, found {} dimensions",
            name, ndims
        )));
    }

    get_as_f64!(var, ..)
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to read {}: {}", name, e)))
}

/// Validate that a component ends in `latitude x longitude` and report the
/// leading dimensions that will be sliced at index 0.
fn check_component_shape(
    var: &netcdf::Variable,
    name: &str,
    rows: usize,
    cols: usize,
) -> NetCdfResult<Vec<SlicedDimension>> {
    let dims = var.dimensions();
    if dims.len() < 2 {
        return Err(NetCdfError::InvalidFormat(format!(
            "{} must have at least 2 dimensions, found {}",
            name,
            dims.len()
        )));
    }

    let (leading, trailing) = dims.split_at(dims.len() - 2);
    let (found_rows, found_cols) = (trailing[0].len(), trailing[1].len());
    if (found_rows, found_cols) != (rows, cols) {
        return Err(NetCdfError::InvalidFormat(format!(
            "{} has trailing shape {}x{}, coordinates imply {}x{}",
            name, found_rows, found_cols, rows, cols
        )));
    }

    leading
        .iter()
        .map(|dim| {
            if dim.len() == 0 {
                return Err(NetCdfError::InvalidFormat(format!(
                    "{} dimension {} is empty",
                    name,
                    dim.name()
                )));
            }
            Ok(SlicedDimension {
                name: dim.name(),
                len: dim.len(),
            })
        })
        .collect()
}

/// Read the first 2-D slab of a component and decode it.
fn read_component(var: &netcdf::Variable, name: &str, slab_len: usize) -> NetCdfResult<Vec<f64>> {
    let read_err = |e: netcdf::Error| NetCdfError::InvalidFormat(format!("Failed to read {}: {}", name, e));

    let mut values: Vec<f64> = match var.dimensions().len() {
        2 => get_as_f64!(var, (.., ..)).map_err(read_err)?,
        3 => get_as_f64!(var, (0, .., ..)).map_err(read_err)?,
        4 => get_as_f64!(var, (0, 0, .., ..)).map_err(read_err)?,
        _ => {
            // Index 0 on every leading dimension is the start of the flat buffer
            let mut all = get_as_f64!(var, ..).map_err(read_err)?;
            all.truncate(slab_len);
            all
        }
    };

    if values.len() != slab_len {
        return Err(NetCdfError::InvalidFormat(format!(
            "{} slab has {} values, expected {}",
            name,
            values.len(),
            slab_len
        )));
    }

    let packing = packing_attributes(var);
    debug!(variable = name, packing = ?packing, "Decoding component");
    packing.decode_in_place(&mut values);

    Ok(values)
}

fn packing_attributes(var: &netcdf::Variable) -> PackingAttributes {
    PackingAttributes {
        fill_value: get_f64_attr(var, "_FillValue"),
        missing_value: get_f64_attr(var, "missing_value"),
        scale_factor: get_f64_attr(var, "scale_factor"),
        add_offset: get_f64_attr(var, "add_offset"),
    }
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Read a numeric scalar attribute of any storage type as f64.
fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    match attr_value {
        netcdf::AttributeValue::Double(d) => Some(d),
        netcdf::AttributeValue::Float(f) => Some(f as f64),
        netcdf::AttributeValue::Short(s) => Some(s as f64),
        netcdf::AttributeValue::Ushort(s) => Some(s as f64),
        netcdf::AttributeValue::Int(i) => Some(i as f64),
        netcdf::AttributeValue::Uint(i) => Some(i as f64),
        netcdf::AttributeValue::Schar(c) => Some(c as f64),
        netcdf::AttributeValue::Uchar(c) => Some(c as f64),
        netcdf::AttributeValue::Longlong(l) => Some(l as f64),
        netcdf::AttributeValue::Ulonglong(l) => Some(l as f64),
        _ => None,
    }
}
