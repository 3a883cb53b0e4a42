//! Warp State.
//!
//! A warp is a group of threads sharing one program counter. Each thread has
//! its own integer register file; the thread mask selects which lanes execute
//! the instructions the warp issues. A warp with an empty mask is inactive.

use crate::common::constants::NUM_REGS;
use crate::isa::abi;

/// Register file of one thread.
pub type RegisterFile = [u32; NUM_REGS];

/// Execution state of one warp.
#[derive(Clone, Debug)]
pub struct Warp {
    /// Program counter shared by all lanes.
    pub pc: u32,
    tmask: u32,
    full_mask: u32,
    regs: Vec<RegisterFile>,
}

impl Warp {
    /// Creates an inactive warp of `num_threads` lanes with zeroed registers.
    pub fn new(num_threads: usize) -> Self {
        let full_mask = if num_threads >= 32 {
            u32::MAX
        } else {
            (1u32 << num_threads) - 1
        };
        Self {
            pc: 0,
            tmask: 0,
            full_mask,
            regs: vec![[0; NUM_REGS]; num_threads],
        }
    }

    /// Number of lanes.
    pub fn num_threads(&self) -> usize {
        self.regs.len()
    }

    /// Current thread mask.
    pub fn tmask(&self) -> u32 {
        self.tmask
    }

    /// Replaces the thread mask; bits beyond the warp width are dropped.
    pub fn set_tmask(&mut self, mask: u32) {
        self.tmask = mask & self.full_mask;
    }

    /// Whether any lane is active.
    pub fn is_active(&self) -> bool {
        self.tmask != 0
    }

    /// Number of active lanes.
    pub fn active_count(&self) -> u32 {
        self.tmask.count_ones()
    }

    /// Lowest active lane; it supplies the operands of warp-uniform decisions.
    pub fn leader(&self) -> Option<usize> {
        self.is_active().then(|| self.tmask.trailing_zeros() as usize)
    }

    /// Indices of the active lanes, lowest first.
    pub fn active_lanes(&self) -> impl Iterator<Item = usize> + use<> {
        let mut mask = self.tmask;
        std::iter::from_fn(move || {
            if mask == 0 {
                return None;
            }
            let lane = mask.trailing_zeros() as usize;
            mask &= mask - 1;
            Some(lane)
        })
    }

    /// Reads register `idx` of lane `thread`.
    #[inline]
    pub fn reg(&self, thread: usize, idx: usize) -> u32 {
        self.regs[thread][idx]
    }

    /// Writes register `idx` of lane `thread`; writes to `x0` are discarded.
    #[inline]
    pub fn set_reg(&mut self, thread: usize, idx: usize, val: u32) {
        if idx != abi::REG_ZERO {
            self.regs[thread][idx] = val;
        }
    }

    /// Activates the warp at `pc` with only lane 0 enabled.
    pub fn activate(&mut self, pc: u32) {
        self.pc = pc;
        self.tmask = 1;
    }

    /// Clears every register and deactivates the warp.
    pub fn clear(&mut self) {
        self.pc = 0;
        self.tmask = 0;
        for regs in &mut self.regs {
            *regs = [0; NUM_REGS];
        }
    }
}
