//! SIMT Core.
//!
//! A core holds a fixed set of warps and issues one warp instruction per cycle,
//! chosen by a round-robin scheduler. It handles:
//! 1. **Fetch/Decode:** Reads the instruction word at the warp's program counter.
//! 2. **Execute:** Delegates to [`execute`](crate::core::execute::execute) for the active lanes.
//! 3. **Warp Control:** Applies thread-mask changes and warp spawns locally; reports
//!    program termination to the processor.

use tracing::trace;

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::data::AccessType;
use crate::common::error::SimError;
use crate::core::csr::CsrView;
use crate::core::execute::{self, Effect, Fault};
use crate::core::scheduler::Scheduler;
use crate::core::warp::Warp;
use crate::isa::abi;
use crate::isa::decode::decode;
use crate::soc::memory::check_range;
use crate::soc::traits::PhysicalMemory;
use crate::stats::SimStats;

/// Program termination reported by a core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// `ECALL` with the given exit code.
    Exit(u32),
    /// `EBREAK`.
    Halt,
}

/// Machine-wide values a core needs while issuing.
#[derive(Clone, Copy, Debug)]
pub struct IssueContext {
    /// Cores in the machine.
    pub num_cores: usize,
    /// Processor cycles elapsed, including the current one.
    pub cycles: u64,
    /// Emit a trace event per issued instruction.
    pub trace: bool,
}

/// One SIMT core.
#[derive(Clone, Debug)]
pub struct Core {
    id: usize,
    warps: Vec<Warp>,
    scheduler: Scheduler,
}

impl Core {
    /// Creates core `id` with `num_warps` inactive warps of `num_threads` lanes.
    pub fn new(id: usize, num_warps: usize, num_threads: usize) -> Self {
        Self {
            id,
            warps: (0..num_warps).map(|_| Warp::new(num_threads)).collect(),
            scheduler: Scheduler::default(),
        }
    }

    /// Core index.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Warps of this core.
    pub fn warps(&self) -> &[Warp] {
        &self.warps
    }

    /// Whether any warp of this core is active.
    pub fn is_active(&self) -> bool {
        self.warps.iter().any(Warp::is_active)
    }

    /// Resets every warp and activates warp 0, lane 0 at `entry`.
    ///
    /// Each lane's stack pointer is placed `global_tid << stack_log2_size`
    /// bytes below `stack_base`, so spawned warps and enabled lanes find a
    /// private stack without further setup.
    pub fn reset(&mut self, entry: u32, stack_base: u64, stack_log2_size: u32) {
        let num_warps = self.warps.len();
        for (w, warp) in self.warps.iter_mut().enumerate() {
            warp.clear();
            let num_threads = warp.num_threads();
            for t in 0..num_threads {
                let global_tid = ((self.id * num_warps + w) * num_threads + t) as u64;
                let sp = stack_base.wrapping_sub(global_tid.wrapping_shl(stack_log2_size));
                warp.set_reg(t, abi::REG_SP, sp as u32);
            }
        }
        self.scheduler.reset();
        if let Some(warp) = self.warps.first_mut() {
            warp.activate(entry);
        }
    }

    /// Issues one warp instruction, if any warp is active.
    ///
    /// # Returns
    ///
    /// `Some` when the instruction terminated the program.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::IllegalInstruction`] or [`SimError::Memory`] if the
    /// instruction faults; the warp's program counter is left at the faulting
    /// instruction.
    pub fn tick(
        &mut self,
        memory: &mut dyn PhysicalMemory,
        ctx: &IssueContext,
        stats: &mut SimStats,
    ) -> Result<Option<Termination>, SimError> {
        let Some(w) = self.scheduler.pick(&self.warps) else {
            return Ok(None);
        };
        let num_warps = self.warps.len();
        let core_id = self.id;
        let warp = &mut self.warps[w];
        let pc = warp.pc;

        let mem_fault = |source| SimError::Memory {
            core: core_id,
            warp: w,
            pc: u64::from(pc),
            source,
        };
        check_range(
            AccessType::Fetch,
            u64::from(pc),
            u64::from(INSTRUCTION_SIZE),
            memory.capacity(),
        )
        .map_err(mem_fault)?;
        let raw = memory.read_u32(u64::from(pc)).map_err(mem_fault)?;
        let inst = decode(raw);

        if ctx.trace {
            trace!(
                core = core_id,
                warp = w,
                pc = format_args!("{pc:#010x}"),
                inst = format_args!("{raw:#010x}"),
                tmask = format_args!("{:#x}", warp.tmask()),
                "issue"
            );
        }

        let csrs = CsrView {
            core: core_id,
            warp: w,
            tmask: warp.tmask(),
            num_cores: ctx.num_cores,
            num_warps,
            num_threads: warp.num_threads(),
            cycles: ctx.cycles,
            instret: stats.warp_instructions,
        };
        let lanes = warp.active_count();
        let outcome = execute::execute(warp, &inst, pc, memory, &csrs).map_err(|fault| match fault {
            Fault::Illegal => SimError::IllegalInstruction {
                core: core_id,
                warp: w,
                pc: u64::from(pc),
                inst: raw,
            },
            Fault::Memory(source) => mem_fault(source),
        })?;
        stats.record(outcome.class, lanes);
        warp.pc = outcome.next_pc;

        match outcome.effect {
            Effect::None => {}
            Effect::Exit(code) => return Ok(Some(Termination::Exit(code))),
            Effect::Halt => return Ok(Some(Termination::Halt)),
            Effect::ThreadMask(mask) => warp.set_tmask(mask),
            Effect::Spawn { count, pc } => {
                let count = (count as usize).min(num_warps);
                for (idx, other) in self.warps.iter_mut().enumerate().take(count).skip(1) {
                    if idx != w {
                        other.activate(pc);
                        stats.warps_spawned += 1;
                    }
                }
            }
        }
        Ok(None)
    }
}
