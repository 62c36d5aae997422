//! Loading the source grid.

use std::path::Path;

use netcdf_parser::{CurrentsDataset, VariableNames};
use tracing::debug;

use crate::error::Result;

/// Load a currents dataset, mapping reader errors onto the conversion
/// taxonomy (`InputNotFound` / `InputMalformed`).
pub fn load_currents(path: &Path, names: &VariableNames) -> Result<CurrentsDataset> {
    let dataset = netcdf_parser::read_currents_with(path, names)?;

    debug!(
        cells = dataset.grid.len(),
        sliced = dataset.sliced.len(),
        "Currents grid ready for conversion"
    );

    Ok(dataset)
}
