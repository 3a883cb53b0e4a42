use simx_core::common::error::MemoryError;
use simx_core::common::AccessType;
use simx_core::soc::memory::check_range;
use simx_core::PhysicalMemory;

/// Flat memory backed by a `Vec` that records every write it accepts.
pub struct MockMemory {
    data: Vec<u8>,
    writes: Vec<(u64, usize)>,
}

impl MockMemory {
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
            writes: Vec::new(),
        }
    }

    /// `(addr, len)` of every accepted write, in order.
    pub fn writes(&self) -> &[(u64, usize)] {
        &self.writes
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }
}

impl PhysicalMemory for MockMemory {
    fn capacity(&self) -> u64 {
        self.data.len() as u64
    }

    fn read(&self, addr: u64, buf: &mut [u8]) -> Result<(), MemoryError> {
        check_range(AccessType::Read, addr, buf.len() as u64, self.capacity())?;
        let start = addr as usize;
        buf.copy_from_slice(&self.data[start..start + buf.len()]);
        Ok(())
    }

    fn write(&mut self, addr: u64, data: &[u8]) -> Result<(), MemoryError> {
        check_range(AccessType::Write, addr, data.len() as u64, self.capacity())?;
        let start = addr as usize;
        self.data[start..start + data.len()].copy_from_slice(data);
        self.writes.push((addr, data.len()));
        Ok(())
    }
}
