//! SIMT Processor.
//!
//! This module defines the `Processor`, the reference [`ProcessorModel`]. It coordinates:
//! 1. **Construction:** One core per configured core, each with the configured warps and lanes.
//! 2. **Reset:** Warp 0, lane 0 of every core starts at the entry point with per-lane stacks.
//! 3. **Cycle Advance:** Every core issues at most one warp instruction per cycle.
//! 4. **Termination:** `ECALL`/`EBREAK` stop the machine immediately; otherwise it stops
//!    once no warp in any core is active.

use tracing::debug;

use crate::common::error::SimError;
use crate::config::{Config, GeneralConfig, MachineConfig};
use crate::core::simt::{Core, IssueContext, Termination};
use crate::core::warp::Warp;
use crate::soc::traits::{PhysicalMemory, ProcessorModel};
use crate::stats::SimStats;

/// Multi-core SIMT processor.
#[derive(Debug)]
pub struct Processor {
    machine: MachineConfig,
    general: GeneralConfig,
    cores: Vec<Core>,
    capacity: Option<u64>,
    running: bool,
    exit_code: Option<u64>,
    stats: SimStats,
}

impl Processor {
    /// Builds a processor from a configuration.
    ///
    /// The processor is idle until it is attached to a memory and reset.
    /// The configuration is assumed valid; see [`Config::validate`].
    pub fn new(config: &Config) -> Self {
        let machine = config.machine;
        let cores = (0..machine.num_cores)
            .map(|id| Core::new(id, machine.num_warps, machine.num_threads))
            .collect();
        Self {
            machine,
            general: config.general.clone(),
            cores,
            capacity: None,
            running: false,
            exit_code: None,
            stats: SimStats::default(),
        }
    }

    /// Machine shape this processor was built with.
    pub fn machine(&self) -> MachineConfig {
        self.machine
    }

    /// Cores of the machine.
    pub fn cores(&self) -> &[Core] {
        &self.cores
    }

    /// Warp `warp` of core `core`, if both exist.
    pub fn warp(&self, core: usize, warp: usize) -> Option<&Warp> {
        self.cores.get(core)?.warps().get(warp)
    }

    /// Capacity of the attached memory, if any.
    pub fn attached_capacity(&self) -> Option<u64> {
        self.capacity
    }

    /// Statistics since the last reset.
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    fn terminate(&mut self, reason: Termination) {
        self.running = false;
        match reason {
            Termination::Exit(code) => {
                self.exit_code = Some(u64::from(code));
                debug!(exit_code = code, cycles = self.stats.cycles, "program exited");
            }
            Termination::Halt => {
                debug!(cycles = self.stats.cycles, "program halted");
            }
        }
    }
}

impl ProcessorModel for Processor {
    fn attach(&mut self, memory: &dyn PhysicalMemory) {
        self.capacity = Some(memory.capacity());
    }

    fn reset(&mut self, entry: u64) {
        let entry = entry as u32;
        for core in &mut self.cores {
            core.reset(entry, self.general.stack_base, self.general.stack_log2_size);
        }
        self.running = true;
        self.exit_code = None;
        self.stats = SimStats::default();
        debug!(
            entry = format_args!("{entry:#x}"),
            cores = self.machine.num_cores,
            warps = self.machine.num_warps,
            threads = self.machine.num_threads,
            "processor reset"
        );
    }

    fn tick(&mut self, memory: &mut dyn PhysicalMemory) -> Result<bool, SimError> {
        if self.capacity.is_none() {
            return Err(SimError::Detached);
        }
        if !self.running {
            return Ok(false);
        }

        self.stats.cycles += 1;
        let ctx = IssueContext {
            num_cores: self.machine.num_cores,
            cycles: self.stats.cycles,
            trace: self.general.trace_instructions,
        };
        for idx in 0..self.cores.len() {
            if let Some(reason) = self.cores[idx].tick(memory, &ctx, &mut self.stats)? {
                self.terminate(reason);
                return Ok(false);
            }
        }

        self.running = self.cores.iter().any(Core::is_active);
        if !self.running {
            debug!(cycles = self.stats.cycles, "all warps retired");
        }
        Ok(self.running)
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn exit_code(&self) -> Option<u64> {
        self.exit_code
    }

    fn cycles(&self) -> u64 {
        self.stats.cycles
    }
}
