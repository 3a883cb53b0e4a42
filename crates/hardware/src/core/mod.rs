//! SIMT processor model.
//!
//! This module contains the reference processor: cores of warps of threads
//! executing RV32IM and the GPU control extension.
//!
//! # Components
//!
//! - `processor`: Top-level model implementing `ProcessorModel`.
//! - `simt`: One core, its warps and its issue loop.
//! - `warp`: Shared program counter, thread mask and per-lane registers.
//! - `scheduler`: Round-robin warp selection.
//! - `execute` / `alu` / `csr`: Instruction semantics.

/// 32-bit integer ALU.
pub mod alu;

/// Identity and counter CSRs.
pub mod csr;

/// Warp instruction execution.
pub mod execute;

/// Top-level processor model.
pub mod processor;

/// Round-robin warp scheduler.
pub mod scheduler;

/// SIMT core.
pub mod simt;

/// Warp state.
pub mod warp;

pub use processor::Processor;
