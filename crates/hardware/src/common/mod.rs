//! Common types shared by the processor model and the memory.
//!
//! This module provides:
//! 1. **Constants:** Address-space geometry, startup layout, and instruction sizes.
//! 2. **Memory Access:** Classification of accesses (fetch/read/write) for fault reporting.
//! 3. **Error Handling:** Simulation, memory, configuration, and image-loading errors.

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types.
pub mod error;

pub use constants::{ADDRESS_SPACE_SIZE, PAGE_SIZE, STARTUP_ADDR};
pub use data::AccessType;
pub use error::{ConfigError, LoadError, MemoryError, SimError};
