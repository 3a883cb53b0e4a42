//! Memory bridge.
//!
//! Copies byte ranges between caller buffers and the instance's physical
//! memory. A transfer is all or nothing: the instance, the buffer and the
//! address range are all validated before the first byte moves.

use simx_core::PhysicalMemory;
use simx_core::common::data::AccessType;
use simx_core::soc::memory::check_range;

use crate::error::{BridgeError, Result};
use crate::session::{InstanceFactory, Session};

/// Checks a transfer of `len` bytes against a caller buffer of `available` bytes.
fn check_buffer(len: usize, available: usize) -> Result<()> {
    if len == 0 {
        return Err(BridgeError::EmptyBuffer);
    }
    if available < len {
        return Err(BridgeError::BufferTooShort {
            requested: len,
            available,
        });
    }
    Ok(())
}

impl<F: InstanceFactory> Session<F> {
    /// Copies all of `data` into memory starting at `addr`.
    ///
    /// # Errors
    ///
    /// See [`Session::write_memory_len`].
    pub fn write_memory(&mut self, addr: u64, data: &[u8]) -> Result<()> {
        self.write_memory_len(addr, data, data.len())
    }

    /// Copies the first `len` bytes of `data` into memory starting at `addr`.
    ///
    /// # Errors
    ///
    /// * [`BridgeError::NotInitialized`] if there is no instance.
    /// * [`BridgeError::EmptyBuffer`] if `len` is zero.
    /// * [`BridgeError::BufferTooShort`] if `data` holds fewer than `len` bytes.
    /// * [`BridgeError::OutOfRange`] if `[addr, addr + len)` leaves memory.
    ///
    /// Memory is unchanged on error.
    pub fn write_memory_len(&mut self, addr: u64, data: &[u8], len: usize) -> Result<()> {
        let inst = self.instance.as_mut().ok_or(BridgeError::NotInitialized)?;
        check_buffer(len, data.len())?;
        check_range(AccessType::Write, addr, len as u64, inst.memory.capacity())?;
        inst.memory.write(addr, &data[..len])?;
        Ok(())
    }

    /// Fills all of `buf` from memory starting at `addr`.
    ///
    /// # Errors
    ///
    /// See [`Session::read_memory_len`].
    pub fn read_memory(&self, addr: u64, buf: &mut [u8]) -> Result<()> {
        let len = buf.len();
        self.read_memory_len(addr, buf, len)
    }

    /// Copies `len` bytes from memory starting at `addr` into the front of `buf`.
    ///
    /// # Errors
    ///
    /// * [`BridgeError::NotInitialized`] if there is no instance.
    /// * [`BridgeError::EmptyBuffer`] if `len` is zero.
    /// * [`BridgeError::BufferTooShort`] if `buf` holds fewer than `len` bytes.
    /// * [`BridgeError::OutOfRange`] if `[addr, addr + len)` leaves memory.
    ///
    /// `buf` is unchanged on error.
    pub fn read_memory_len(&self, addr: u64, buf: &mut [u8], len: usize) -> Result<()> {
        let inst = self.instance.as_ref().ok_or(BridgeError::NotInitialized)?;
        check_buffer(len, buf.len())?;
        check_range(AccessType::Read, addr, len as u64, inst.memory.capacity())?;
        inst.memory.read(addr, &mut buf[..len])?;
        Ok(())
    }

    /// Reads `len` bytes starting at `addr` into a new vector.
    ///
    /// # Errors
    ///
    /// As [`Session::read_memory_len`].
    pub fn read_memory_vec(&self, addr: u64, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.read_memory(addr, &mut buf)?;
        Ok(buf)
    }
}
