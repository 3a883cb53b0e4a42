//! CSR read access.
//!
//! The model exposes identity and counter CSRs only. Their values depend on
//! which lane reads them, so the execute stage builds one [`CsrView`] per
//! issued instruction and asks it per lane.

use crate::isa::privileged::csr;

/// Snapshot of the state the CSRs expose to one issued warp instruction.
#[derive(Clone, Copy, Debug)]
pub struct CsrView {
    /// Issuing core.
    pub core: usize,
    /// Issuing warp.
    pub warp: usize,
    /// Thread mask at issue.
    pub tmask: u32,
    /// Cores in the machine.
    pub num_cores: usize,
    /// Warps per core.
    pub num_warps: usize,
    /// Threads per warp.
    pub num_threads: usize,
    /// Processor cycles elapsed.
    pub cycles: u64,
    /// Warp instructions issued so far.
    pub instret: u64,
}

impl CsrView {
    /// Reads CSR `addr` as seen by lane `thread`.
    ///
    /// # Returns
    ///
    /// `None` if the address is not implemented.
    pub fn read(&self, addr: u32, thread: usize) -> Option<u32> {
        let global_warp = self.core * self.num_warps + self.warp;
        let value = match addr {
            csr::THREAD_ID => thread as u32,
            csr::WARP_ID => self.warp as u32,
            csr::CORE_ID => self.core as u32,
            csr::THREAD_MASK => self.tmask,
            csr::GLOBAL_WARP_ID => global_warp as u32,
            csr::MHARTID => (global_warp * self.num_threads + thread) as u32,
            csr::NUM_THREADS => self.num_threads as u32,
            csr::NUM_WARPS => self.num_warps as u32,
            csr::NUM_CORES => self.num_cores as u32,
            csr::CYCLE => self.cycles as u32,
            csr::CYCLEH => (self.cycles >> 32) as u32,
            csr::INSTRET => self.instret as u32,
            csr::INSTRETH => (self.instret >> 32) as u32,
            _ => return None,
        };
        Some(value)
    }
}
