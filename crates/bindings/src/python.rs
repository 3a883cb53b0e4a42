//! Python binding.
//!
//! Exposes a [`Session`] to Python testbenches (for example cocotb) as the
//! `Simx` class:
//!
//! ```python
//! from simx_bridge import Simx
//!
//! sim = Simx()
//! sim.init(1, 4, 32, kernel="kernel.bin")
//! while sim.step(100):
//!     pass
//! result = sim.read_memory(0x8000_1000, 4)
//! sim.cleanup()
//! ```

use pyo3::prelude::*;
use pyo3::types::PyBytes;
use simx_core::config::MachineConfig;

use crate::conversion::{py_dict_to_config, py_to_image, to_py_err};
use crate::logging;
use crate::session::Session;
use crate::stepping::StepBudget;

/// Python-exposed simulation session.
#[pyclass(name = "Simx")]
#[derive(Debug)]
pub struct PySimx {
    inner: Session,
}

#[pymethods]
impl PySimx {
    /// Creates an empty session and installs the stderr log subscriber.
    #[new]
    fn new() -> Self {
        logging::init();
        Self {
            inner: Session::new(),
        }
    }

    /// Creates a fresh simulation instance, replacing any existing one.
    ///
    /// # Arguments
    /// * `cores`, `warps`, `threads` - Machine shape; overrides `config["machine"]`.
    /// * `kernel` - Optional program image: a path, or the image itself as `bytes`.
    /// * `config` - Optional configuration dict for memory and startup settings.
    ///
    /// # Errors
    /// `ValueError` for an invalid configuration, `OSError` if the image cannot be
    /// loaded. After an `OSError` the instance exists and memory can still be written.
    #[pyo3(signature = (cores, warps, threads, kernel=None, config=None))]
    fn init(
        &mut self,
        py: Python<'_>,
        cores: usize,
        warps: usize,
        threads: usize,
        kernel: Option<&Bound<'_, PyAny>>,
        config: Option<&Bound<'_, PyAny>>,
    ) -> PyResult<()> {
        let mut cfg = match config {
            Some(dict) => py_dict_to_config(py, dict)?,
            None => simx_core::Config::default(),
        };
        cfg.machine = MachineConfig {
            num_cores: cores,
            num_warps: warps,
            num_threads: threads,
        };
        let image = kernel.map(py_to_image).transpose()?;
        self.inner
            .initialize(&cfg, image.as_ref())
            .map_err(to_py_err)
    }

    /// Advances the simulation; `cycles == 0` runs to completion.
    ///
    /// Returns `True` while the program is still running.
    #[pyo3(signature = (cycles=0))]
    fn step(&mut self, py: Python<'_>, cycles: u64) -> PyResult<bool> {
        let inner = &mut self.inner;
        py.allow_threads(|| inner.step(StepBudget::from_raw(cycles)))
            .map(|status| status.is_running())
            .map_err(to_py_err)
    }

    /// Copies `data` into simulated memory at `addr`.
    fn write_memory(&mut self, addr: u64, data: &[u8]) -> PyResult<()> {
        self.inner.write_memory(addr, data).map_err(to_py_err)
    }

    /// Returns `size` bytes of simulated memory starting at `addr`.
    fn read_memory<'py>(
        &self,
        py: Python<'py>,
        addr: u64,
        size: usize,
    ) -> PyResult<Bound<'py, PyBytes>> {
        let buf = self.inner.read_memory_vec(addr, size).map_err(to_py_err)?;
        Ok(PyBytes::new(py, &buf))
    }

    /// Destroys the simulation instance; a no-op when there is none.
    fn cleanup(&mut self) {
        self.inner.cleanup();
    }

    /// Whether a simulation instance exists.
    #[getter]
    fn initialized(&self) -> bool {
        self.inner.is_initialized()
    }

    /// Exit code of the finished program, or `None`.
    #[getter]
    fn exit_code(&self) -> Option<u64> {
        self.inner.exit_code()
    }

    /// Processor cycles since the instance was created, or `None`.
    #[getter]
    fn cycles(&self) -> Option<u64> {
        self.inner.processor().map(|p| p.stats().cycles)
    }

    /// Text statistics report of the live instance, or `None`.
    fn stats(&self) -> Option<String> {
        self.inner.processor().map(|p| p.stats().report())
    }
}

/// Registers the binding classes on the given Python module.
///
/// # Errors
///
/// Returns a `PyErr` if registration fails.
pub fn register_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySimx>()?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

#[pymodule]
fn simx_bridge(m: &Bound<'_, PyModule>) -> PyResult<()> {
    register_module(m)
}
