//! SIMT processor model for the SimX bridge.
//!
//! This crate implements the two collaborators the bridge drives:
//! 1. **Processor:** Cores of warps of threads executing RV32IM plus the GPU control extension.
//! 2. **Memory:** A sparse, page-granular physical memory spanning the 32-bit address space.
//! 3. **ISA:** Decoding for the base integer set, multiply/divide, and the warp-control opcodes.
//! 4. **Simulation:** Configuration, program-image loading and statistics collection.

/// Common types (constants, access kinds, errors).
pub mod common;
/// Simulator configuration (machine shape, memory geometry, startup layout).
pub mod config;
/// Processor model (cores, warps, execution, scheduling).
pub mod core;
/// Instruction set (decode, instruction bits, RV32I/M, warp-control extension).
pub mod isa;
/// Program-image loading.
pub mod sim;
/// Physical memory and collaborator traits.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Machine shape (cores, warps per core, threads per warp).
pub use crate::config::MachineConfig;
/// Reference processor model.
pub use crate::core::Processor;
/// Program image source.
pub use crate::sim::loader::ProgramImage;
/// Reference physical memory.
pub use crate::soc::memory::Ram;
/// Collaborator capability sets.
pub use crate::soc::traits::{PhysicalMemory, ProcessorModel};
