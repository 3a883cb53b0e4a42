//! Physical System Memory.
//!
//! This module implements the main memory of a simulation instance. It provides:
//! 1. **Sparse storage:** Pages are allocated on first write, so a 4 GiB address space costs
//!    only what the program and the harness actually touch. Untouched bytes read as zero.
//! 2. **Bounds checking:** Every access is validated against the capacity before any byte moves.
//! 3. **Range helper:** [`check_range`] for callers that validate requests up front.

use std::collections::HashMap;

use crate::common::constants::PAGE_SIZE;
use crate::common::data::AccessType;
use crate::common::error::MemoryError;
use crate::soc::traits::PhysicalMemory;

/// Validates that `[addr, addr + len)` lies inside `[0, capacity)`.
///
/// # Errors
///
/// Returns [`MemoryError::OutOfRange`] if the range overflows or leaves the memory.
pub fn check_range(
    access: AccessType,
    addr: u64,
    len: u64,
    capacity: u64,
) -> Result<(), MemoryError> {
    match addr.checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(MemoryError::OutOfRange {
            access,
            addr,
            len,
            capacity,
        }),
    }
}

/// Sparse, page-granular physical memory.
#[derive(Debug)]
pub struct Ram {
    pages: HashMap<u64, Box<[u8]>>,
    capacity: u64,
    page_size: u64,
}

impl Ram {
    /// Creates an empty memory of `capacity` bytes with the default page size.
    pub fn new(capacity: u64) -> Self {
        Self::with_page_size(capacity, PAGE_SIZE)
    }

    /// Creates an empty memory with an explicit page size.
    ///
    /// `page_size` must be a non-zero power of two; the configuration layer
    /// validates this before an instance is built.
    pub fn with_page_size(capacity: u64, page_size: u64) -> Self {
        debug_assert!(page_size.is_power_of_two(), "page size must be a power of two");
        Self {
            pages: HashMap::new(),
            capacity,
            page_size,
        }
    }

    /// Allocation granularity in bytes.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of pages currently backed by host memory.
    pub fn resident_pages(&self) -> usize {
        self.pages.len()
    }

    /// Releases every page; all bytes read as zero afterwards.
    pub fn clear(&mut self) {
        self.pages.clear();
    }

    /// Splits `[addr, addr + len)` into per-page `(page, offset, chunk)` pieces.
    fn chunks(&self, addr: u64, len: usize) -> impl Iterator<Item = (u64, usize, usize)> + use<> {
        let page_size = self.page_size;
        let mut cursor = addr;
        let mut remaining = len as u64;
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            let page = cursor / page_size;
            let offset = cursor % page_size;
            let chunk = remaining.min(page_size - offset);
            cursor += chunk;
            remaining -= chunk;
            Some((page, offset as usize, chunk as usize))
        })
    }
}

impl PhysicalMemory for Ram {
    fn capacity(&self) -> u64 {
        self.capacity
    }

    fn read(&self, addr: u64, buf: &mut [u8]) -> Result<(), MemoryError> {
        check_range(AccessType::Read, addr, buf.len() as u64, self.capacity)?;
        let mut done = 0;
        for (page, offset, chunk) in self.chunks(addr, buf.len()) {
            let dst = &mut buf[done..done + chunk];
            match self.pages.get(&page) {
                Some(bytes) => dst.copy_from_slice(&bytes[offset..offset + chunk]),
                None => dst.fill(0),
            }
            done += chunk;
        }
        Ok(())
    }

    fn write(&mut self, addr: u64, data: &[u8]) -> Result<(), MemoryError> {
        check_range(AccessType::Write, addr, data.len() as u64, self.capacity)?;
        let page_size = self.page_size as usize;
        let mut done = 0;
        for (page, offset, chunk) in self.chunks(addr, data.len()) {
            let bytes = self
                .pages
                .entry(page)
                .or_insert_with(|| vec![0u8; page_size].into_boxed_slice());
            bytes[offset..offset + chunk].copy_from_slice(&data[done..done + chunk]);
            done += chunk;
        }
        Ok(())
    }
}
