//! Control and memory bridge between verification harnesses and the SimX simulator.
//!
//! This crate lets an external testbench drive the SIMT simulator as if it were the
//! hardware under test. It provides:
//! 1. **Lifecycle:** A [`Session`] owning at most one simulation instance (processor + memory).
//! 2. **Stepping:** Bounded or run-to-completion advance with a running/finished status.
//! 3. **Memory bridge:** Bounds-checked byte transfers in both directions.
//! 4. **Boundaries:** A handle-based C ABI for DPI-C harnesses and, with the `python`
//!    feature, a PyO3 class for Python testbenches.

/// Bridge error type and C status codes.
pub mod error;
/// Handle-based C ABI.
pub mod ffi;
/// Log subscriber setup.
pub mod logging;
/// Memory bridge operations.
pub mod memory;
/// Session and instance lifecycle.
pub mod session;
/// Stepping controller.
pub mod stepping;

/// Python dict and error conversion.
#[cfg(feature = "python")]
pub mod conversion;
/// Python binding (`Simx`).
#[cfg(feature = "python")]
pub mod python;

pub use error::BridgeError;
pub use session::{InstanceFactory, Session, SimxFactory};
pub use stepping::{StepBudget, StepStatus};
