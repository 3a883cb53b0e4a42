//! Python↔Rust conversion helpers.
//!
//! Converts Python configuration dicts into the core `Config` type via JSON,
//! so Python testbenches and `simx_init_json` share one schema, and maps
//! bridge errors onto Python exception types.

use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyBytes;
use simx_core::config::Config;
use simx_core::sim::loader::ProgramImage;

use crate::error::BridgeError;

/// Converts a Python dict to a simulator `Config`.
///
/// The dict is serialized with Python's `json.dumps` and parsed with
/// [`Config::from_json`]; missing keys take their defaults.
///
/// # Arguments
///
/// * `py` - Python interpreter handle.
/// * `dict` - A Python dict with `machine`, `memory` and `general` sections.
///
/// # Returns
///
/// The deserialized `Config`, or a `ValueError` if the dict does not match the schema.
pub fn py_dict_to_config(py: Python<'_>, dict: &Bound<'_, PyAny>) -> PyResult<Config> {
    let json = py.import("json")?;
    let json_str: String = json.getattr("dumps")?.call1((dict,))?.extract()?;
    Config::from_json(&json_str).map_err(|e| PyValueError::new_err(format!("Invalid config: {e}")))
}

/// Converts a Python kernel argument to a program image.
///
/// `bytes` objects are loaded as-is; anything else is treated as a path
/// (`str` or `os.PathLike`).
pub fn py_to_image(kernel: &Bound<'_, PyAny>) -> PyResult<ProgramImage> {
    if let Ok(bytes) = kernel.downcast::<PyBytes>() {
        return Ok(ProgramImage::from_bytes(bytes.as_bytes()));
    }
    let path: std::path::PathBuf = kernel.extract()?;
    Ok(ProgramImage::Path(path))
}

/// Maps a bridge error onto the closest Python exception.
///
/// Configuration and buffer errors become `ValueError`, image errors
/// `OSError`, and missing instances or simulation faults `RuntimeError`.
pub fn to_py_err(err: BridgeError) -> PyErr {
    let msg = err.to_string();
    match err {
        BridgeError::Config(_)
        | BridgeError::EmptyBuffer
        | BridgeError::BufferTooShort { .. }
        | BridgeError::OutOfRange(_) => PyValueError::new_err(msg),
        BridgeError::Image(_) => PyIOError::new_err(msg),
        BridgeError::NotInitialized | BridgeError::Sim(_) => PyRuntimeError::new_err(msg),
    }
}
