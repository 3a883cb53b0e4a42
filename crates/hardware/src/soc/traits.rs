//! Collaborator capability sets.
//!
//! This module defines the two interfaces the bridge drives. It provides:
//! 1. **PhysicalMemory:** A flat, byte-addressable store with bounds-checked slice access.
//! 2. **ProcessorModel:** An instruction-executing machine that advances one cycle at a time
//!    or runs until the simulated program terminates.
//!
//! The instance that owns both pairs them: the processor is attached to the memory once
//! and then receives it by reference on every advance, so it never owns or outlives it.

use crate::common::error::{MemoryError, SimError};

/// Flat byte-addressable physical memory spanning `[0, capacity)`.
///
/// Implementations reject any access that does not lie entirely inside the
/// range before touching a byte.
pub trait PhysicalMemory {
    /// Number of addressable bytes.
    fn capacity(&self) -> u64;

    /// Copies `buf.len()` bytes starting at `addr` into `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::OutOfRange`] if the range leaves the memory.
    fn read(&self, addr: u64, buf: &mut [u8]) -> Result<(), MemoryError>;

    /// Copies `data` into memory starting at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::OutOfRange`] if the range leaves the memory;
    /// nothing is written in that case.
    fn write(&mut self, addr: u64, data: &[u8]) -> Result<(), MemoryError>;

    /// Reads one byte.
    ///
    /// # Errors
    ///
    /// Propagates [`PhysicalMemory::read`] failures.
    fn read_u8(&self, addr: u64) -> Result<u8, MemoryError> {
        let mut bytes = [0u8; 1];
        self.read(addr, &mut bytes)?;
        Ok(bytes[0])
    }

    /// Reads a little-endian half-word.
    ///
    /// # Errors
    ///
    /// Propagates [`PhysicalMemory::read`] failures.
    fn read_u16(&self, addr: u64) -> Result<u16, MemoryError> {
        let mut bytes = [0u8; 2];
        self.read(addr, &mut bytes)?;
        Ok(u16::from_le_bytes(bytes))
    }

    /// Reads a little-endian word.
    ///
    /// # Errors
    ///
    /// Propagates [`PhysicalMemory::read`] failures.
    fn read_u32(&self, addr: u64) -> Result<u32, MemoryError> {
        let mut bytes = [0u8; 4];
        self.read(addr, &mut bytes)?;
        Ok(u32::from_le_bytes(bytes))
    }

    /// Writes one byte.
    ///
    /// # Errors
    ///
    /// Propagates [`PhysicalMemory::write`] failures.
    fn write_u8(&mut self, addr: u64, val: u8) -> Result<(), MemoryError> {
        self.write(addr, &[val])
    }

    /// Writes a little-endian half-word.
    ///
    /// # Errors
    ///
    /// Propagates [`PhysicalMemory::write`] failures.
    fn write_u16(&mut self, addr: u64, val: u16) -> Result<(), MemoryError> {
        self.write(addr, &val.to_le_bytes())
    }

    /// Writes a little-endian word.
    ///
    /// # Errors
    ///
    /// Propagates [`PhysicalMemory::write`] failures.
    fn write_u32(&mut self, addr: u64, val: u32) -> Result<(), MemoryError> {
        self.write(addr, &val.to_le_bytes())
    }
}

/// Instruction-executing machine advanced by the stepping controller.
pub trait ProcessorModel {
    /// Associates the processor with the memory it will execute against.
    ///
    /// The processor keeps only the geometry it needs; the memory itself is
    /// passed to every [`tick`](ProcessorModel::tick) by its owner.
    fn attach(&mut self, memory: &dyn PhysicalMemory);

    /// Returns the processor to its reset state with execution starting at `entry`.
    fn reset(&mut self, entry: u64);

    /// Advances the machine by exactly one cycle.
    ///
    /// # Returns
    ///
    /// `Ok(true)` while the simulated program still has work to do, `Ok(false)`
    /// once it has terminated. Ticking a terminated processor does nothing and
    /// reports `false`.
    ///
    /// # Errors
    ///
    /// Returns a [`SimError`] on an unrecoverable fault.
    fn tick(&mut self, memory: &mut dyn PhysicalMemory) -> Result<bool, SimError>;

    /// Advances the machine until the simulated program terminates.
    ///
    /// Does not return for a program that never terminates.
    ///
    /// # Returns
    ///
    /// The program's exit code (zero when it terminated without reporting one).
    ///
    /// # Errors
    ///
    /// Returns a [`SimError`] on an unrecoverable fault.
    fn run(&mut self, memory: &mut dyn PhysicalMemory) -> Result<u64, SimError> {
        while self.tick(memory)? {}
        Ok(self.exit_code().unwrap_or(0))
    }

    /// Whether the simulated program is still running.
    fn is_running(&self) -> bool;

    /// Exit code reported by the simulated program, if it reported one.
    fn exit_code(&self) -> Option<u64>;

    /// Cycles advanced since the last reset.
    fn cycles(&self) -> u64;
}
