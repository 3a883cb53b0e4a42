//! Error definitions for the simulator.
//!
//! This module defines the failure taxonomy of the collaborators. It provides:
//! 1. **Memory Errors:** Accesses that leave the configured address range.
//! 2. **Simulation Errors:** Faults raised by a warp while executing (illegal instruction, bad access).
//! 3. **Configuration Errors:** Machine shapes and memory geometries the model cannot build.
//! 4. **Load Errors:** Program images that cannot be read, parsed or placed.

use std::path::PathBuf;

use thiserror::Error;

use super::data::AccessType;

/// Failure of a physical memory access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// The byte range `[addr, addr + len)` is not inside `[0, capacity)`.
    #[error("{access} of {len} bytes at {addr:#x} exceeds memory capacity {capacity:#x}")]
    OutOfRange {
        /// Kind of access that was attempted.
        access: AccessType,
        /// First byte of the access.
        addr: u64,
        /// Length of the access in bytes.
        len: u64,
        /// Capacity of the memory in bytes.
        capacity: u64,
    },
}

/// Fatal fault raised inside the processor model.
///
/// The model does not implement trap handlers, so every fault is terminal
/// for the operation that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The fetched word does not decode to a supported instruction.
    #[error("illegal instruction {inst:#010x} at pc {pc:#x} (core {core}, warp {warp})")]
    IllegalInstruction {
        /// Core that issued the instruction.
        core: usize,
        /// Warp that issued the instruction.
        warp: usize,
        /// Program counter of the instruction.
        pc: u64,
        /// Raw instruction word.
        inst: u32,
    },

    /// A fetch, load or store left the physical address range.
    #[error("memory fault at pc {pc:#x} (core {core}, warp {warp}): {source}")]
    Memory {
        /// Core that issued the access.
        core: usize,
        /// Warp that issued the access.
        warp: usize,
        /// Program counter of the faulting instruction.
        pc: u64,
        /// Underlying memory error.
        #[source]
        source: MemoryError,
    },

    /// The processor was advanced before being attached to a memory.
    #[error("processor advanced before a memory was attached")]
    Detached,
}

/// Rejected simulator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A machine dimension is zero.
    #[error("{field} must be a positive integer")]
    ZeroCount {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A machine dimension exceeds what the model can represent.
    #[error("{field} = {requested} exceeds the supported maximum of {max}")]
    TooLarge {
        /// Name of the offending field.
        field: &'static str,
        /// Requested value.
        requested: u64,
        /// Largest accepted value.
        max: u64,
    },

    /// The page size is zero or not a power of two.
    #[error("page size {0} is not a non-zero power of two")]
    InvalidPageSize(u64),

    /// Per-thread stacks do not fit the 32-bit address space.
    #[error("stack_log2_size = {0} must be below 32")]
    InvalidStackSize(u32),

    /// An address setting lies outside simulated memory.
    #[error("{field} = {addr:#x} lies outside memory of capacity {capacity:#x}")]
    AddressOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Configured address.
        addr: u64,
        /// Configured memory capacity.
        capacity: u64,
    },

    /// The configuration document could not be parsed.
    #[error("invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure to place a program image into memory.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image file could not be read.
    #[error("cannot read program image '{}': {source}", path.display())]
    Io {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The image contains no bytes.
    #[error("program image is empty")]
    Empty,

    /// The image carries an ELF header but is malformed.
    #[error("malformed ELF image: {0}")]
    Elf(#[from] object::read::Error),

    /// The ELF image has no loadable segment with file data.
    #[error("ELF image has no loadable segments")]
    NoLoadableSegments,

    /// The ELF entry point lies outside memory.
    #[error("entry point {entry:#x} lies outside memory of capacity {capacity:#x}")]
    EntryOutOfRange {
        /// Entry point named by the image.
        entry: u64,
        /// Capacity of the destination memory.
        capacity: u64,
    },

    /// The image does not fit at its load address.
    #[error("program image does not fit in memory: {0}")]
    Memory(#[from] MemoryError),
}
