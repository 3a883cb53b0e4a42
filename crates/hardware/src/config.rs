//! Configuration system for the SIMT simulator.
//!
//! This module defines the configuration structures used to build a simulation instance.
//! It provides:
//! 1. **Defaults:** Baseline machine shape, memory geometry and startup layout.
//! 2. **Structures:** Hierarchical config for the machine, the memory and general options.
//! 3. **Validation:** Rejection of shapes the processor model cannot represent.
//!
//! Configuration is supplied as JSON from a harness (see [`Config::from_json`]) or built
//! in code starting from `Config::default()`.

use serde::Deserialize;

use crate::common::constants::{MAX_THREADS_PER_WARP, MAX_WARPS_PER_CORE};
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    use crate::common::constants;

    /// Number of cores in the default machine.
    pub const NUM_CORES: usize = 1;

    /// Warps per core in the default machine.
    pub const NUM_WARPS: usize = 4;

    /// Threads per warp in the default machine.
    pub const NUM_THREADS: usize = 4;

    /// Memory capacity (4 GiB, the full 32-bit physical range).
    pub const CAPACITY: u64 = constants::ADDRESS_SPACE_SIZE;

    /// Page size of the sparse backing store.
    pub const PAGE_SIZE: u64 = constants::PAGE_SIZE;

    /// Reset program counter and raw-image load address.
    pub const STARTUP_ADDR: u64 = constants::STARTUP_ADDR;

    /// Top of the per-thread stack region.
    pub const STACK_BASE: u64 = constants::STACK_BASE_ADDR;

    /// log2 of the per-thread stack size.
    pub const STACK_LOG2_SIZE: u32 = constants::STACK_LOG2_SIZE;

    /// Cores the model supports; bounded so global thread ids fit 32 bits.
    pub const MAX_CORES: usize = 1024;

    pub const MAX_PAGE_SIZE: u64 = 1 << 24;

    pub const MAX_STACK_LOG2_SIZE: u32 = 31;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use simx_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.machine.num_cores, 1);
/// assert_eq!(config.general.startup_addr, 0x8000_0000);
/// ```
///
/// Deserializing from JSON (typical harness usage):
///
/// ```
/// use simx_core::config::Config;
///
/// let json = r#"{
///     "machine": { "num_cores": 2, "num_warps": 8, "num_threads": 16 },
///     "memory": { "capacity": 1048576 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.machine.num_warps, 8);
/// assert_eq!(config.memory.capacity, 1 << 20);
/// assert_eq!(config.memory.page_size, 4096);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Machine shape
    #[serde(default)]
    pub machine: MachineConfig,
    /// Physical memory geometry
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Startup layout and tracing
    #[serde(default)]
    pub general: GeneralConfig,
}

impl Config {
    /// Builds a default configuration with the given machine shape.
    pub fn with_machine(num_cores: usize, num_warps: usize, num_threads: usize) -> Self {
        Self {
            machine: MachineConfig {
                num_cores,
                num_warps,
                num_threads,
            },
            ..Self::default()
        }
    }

    /// Parses a JSON configuration document; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is not valid JSON or has
    /// fields of the wrong type. The result is not validated.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks every section of the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.machine.validate()?;
        self.memory.validate()?;
        self.general.validate(self.memory.capacity)
    }
}

/// Machine shape: cores, warps per core, threads per warp.
///
/// Immutable once an instance is built from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MachineConfig {
    /// Number of cores
    #[serde(default = "MachineConfig::default_num_cores")]
    pub num_cores: usize,
    /// Warps per core
    #[serde(default = "MachineConfig::default_num_warps")]
    pub num_warps: usize,
    /// Threads per warp
    #[serde(default = "MachineConfig::default_num_threads")]
    pub num_threads: usize,
}

impl MachineConfig {
    fn default_num_cores() -> usize {
        defaults::NUM_CORES
    }

    fn default_num_warps() -> usize {
        defaults::NUM_WARPS
    }

    fn default_num_threads() -> usize {
        defaults::NUM_THREADS
    }

    /// Total hardware threads across the machine.
    pub fn total_threads(&self) -> usize {
        self.num_cores * self.num_warps * self.num_threads
    }

    /// Rejects zero dimensions and dimensions beyond the mask widths.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCount`] or [`ConfigError::TooLarge`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("num_cores", self.num_cores, defaults::MAX_CORES),
            ("num_warps", self.num_warps, MAX_WARPS_PER_CORE),
            ("num_threads", self.num_threads, MAX_THREADS_PER_WARP),
        ];
        for (field, value, max) in fields {
            if value == 0 {
                return Err(ConfigError::ZeroCount { field });
            }
            if value > max {
                return Err(ConfigError::TooLarge {
                    field,
                    requested: value as u64,
                    max: max as u64,
                });
            }
        }
        Ok(())
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            num_cores: defaults::NUM_CORES,
            num_warps: defaults::NUM_WARPS,
            num_threads: defaults::NUM_THREADS,
        }
    }
}

/// Physical memory geometry.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Addressable bytes, starting at physical address 0
    #[serde(default = "MemoryConfig::default_capacity")]
    pub capacity: u64,
    /// Allocation granularity of the sparse store
    #[serde(default = "MemoryConfig::default_page_size")]
    pub page_size: u64,
}

impl MemoryConfig {
    fn default_capacity() -> u64 {
        defaults::CAPACITY
    }

    fn default_page_size() -> u64 {
        defaults::PAGE_SIZE
    }

    /// Rejects an empty memory, one larger than the 32-bit address space,
    /// and page sizes that are not powers of two or exceed the memory
    /// (at most 16 MiB).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCount`], [`ConfigError::TooLarge`] or
    /// [`ConfigError::InvalidPageSize`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCount { field: "capacity" });
        }
        if self.capacity > defaults::CAPACITY {
            return Err(ConfigError::TooLarge {
                field: "capacity",
                requested: self.capacity,
                max: defaults::CAPACITY,
            });
        }
        if !self.page_size.is_power_of_two() {
            return Err(ConfigError::InvalidPageSize(self.page_size));
        }
        let max_page = self.capacity.min(defaults::MAX_PAGE_SIZE);
        if self.page_size > max_page {
            return Err(ConfigError::TooLarge {
                field: "page_size",
                requested: self.page_size,
                max: max_page,
            });
        }
        Ok(())
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            capacity: defaults::CAPACITY,
            page_size: defaults::PAGE_SIZE,
        }
    }
}

/// Startup layout and tracing options.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Reset program counter; raw images are loaded here
    #[serde(default = "GeneralConfig::default_startup_addr")]
    pub startup_addr: u64,
    /// Top of the per-thread stack region
    #[serde(default = "GeneralConfig::default_stack_base")]
    pub stack_base: u64,
    /// log2 of each thread's stack size
    #[serde(default = "GeneralConfig::default_stack_log2_size")]
    pub stack_log2_size: u32,
    /// Emit a `trace` event for every issued warp instruction
    #[serde(default)]
    pub trace_instructions: bool,
}

impl GeneralConfig {
    fn default_startup_addr() -> u64 {
        defaults::STARTUP_ADDR
    }

    fn default_stack_base() -> u64 {
        defaults::STACK_BASE
    }

    fn default_stack_log2_size() -> u32 {
        defaults::STACK_LOG2_SIZE
    }

    /// Checks the startup layout against a memory of `capacity` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AddressOutOfRange`] if `startup_addr` is not
    /// inside memory, [`ConfigError::TooLarge`] if `stack_base` exceeds the
    /// 32-bit address space, and [`ConfigError::InvalidStackSize`] if
    /// `stack_log2_size` is 32 or more.
    pub fn validate(&self, capacity: u64) -> Result<(), ConfigError> {
        if self.startup_addr >= capacity {
            return Err(ConfigError::AddressOutOfRange {
                field: "startup_addr",
                addr: self.startup_addr,
                capacity,
            });
        }
        if self.stack_base > u64::from(u32::MAX) {
            return Err(ConfigError::TooLarge {
                field: "stack_base",
                requested: self.stack_base,
                max: u64::from(u32::MAX),
            });
        }
        if self.stack_log2_size > defaults::MAX_STACK_LOG2_SIZE {
            return Err(ConfigError::InvalidStackSize(self.stack_log2_size));
        }
        Ok(())
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            startup_addr: defaults::STARTUP_ADDR,
            stack_base: defaults::STACK_BASE,
            stack_log2_size: defaults::STACK_LOG2_SIZE,
            trace_instructions: false,
        }
    }
}
