//! Simulation statistics collection and reporting.
//!
//! This module tracks the activity of the SIMT processor. It provides:
//! 1. **Throughput:** Cycles, issued warp instructions, and executed thread instructions.
//! 2. **Instruction mix:** Counts by category (ALU, mul/div, load, store, branch, jump, system, GPU).
//! 3. **SIMT utilization:** Average active lanes per issued warp instruction and warps spawned.

use std::fmt::{self, Write as _};
use std::time::Instant;

/// Category of an issued instruction, recorded once per warp instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstClass {
    /// Integer register/immediate arithmetic, LUI, AUIPC, FENCE.
    Alu,
    /// Multiply and divide.
    MulDiv,
    /// Loads.
    Load,
    /// Stores.
    Store,
    /// Conditional branches.
    Branch,
    /// JAL and JALR.
    Jump,
    /// CSR access, ECALL, EBREAK.
    System,
    /// Thread-mask control, warp spawn, barrier.
    Gpu,
}

/// Simulation statistics for one processor instance.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Processor cycles elapsed.
    pub cycles: u64,
    /// Warp instructions issued.
    pub warp_instructions: u64,
    /// Thread instructions executed (issued warp instructions times active lanes).
    pub thread_instructions: u64,
    /// Warps activated by `WSPAWN`.
    pub warps_spawned: u64,

    /// ALU instructions issued.
    pub inst_alu: u64,
    /// Multiply/divide instructions issued.
    pub inst_mul_div: u64,
    /// Load instructions issued.
    pub inst_load: u64,
    /// Store instructions issued.
    pub inst_store: u64,
    /// Conditional branches issued.
    pub inst_branch: u64,
    /// Jumps issued.
    pub inst_jump: u64,
    /// System instructions issued.
    pub inst_system: u64,
    /// GPU control instructions issued.
    pub inst_gpu: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            warp_instructions: 0,
            thread_instructions: 0,
            warps_spawned: 0,
            inst_alu: 0,
            inst_mul_div: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_jump: 0,
            inst_system: 0,
            inst_gpu: 0,
        }
    }
}

impl SimStats {
    /// Records one issued warp instruction.
    ///
    /// # Arguments
    ///
    /// * `class` - Category of the instruction.
    /// * `lanes` - Number of threads active when it was issued.
    pub fn record(&mut self, class: InstClass, lanes: u32) {
        self.warp_instructions += 1;
        self.thread_instructions += u64::from(lanes);
        let counter = match class {
            InstClass::Alu => &mut self.inst_alu,
            InstClass::MulDiv => &mut self.inst_mul_div,
            InstClass::Load => &mut self.inst_load,
            InstClass::Store => &mut self.inst_store,
            InstClass::Branch => &mut self.inst_branch,
            InstClass::Jump => &mut self.inst_jump,
            InstClass::System => &mut self.inst_system,
            InstClass::Gpu => &mut self.inst_gpu,
        };
        *counter += 1;
    }

    /// Average number of active lanes per issued warp instruction.
    pub fn simt_efficiency(&self) -> f64 {
        if self.warp_instructions == 0 {
            return 0.0;
        }
        self.thread_instructions as f64 / self.warp_instructions as f64
    }

    /// Renders the statistics as a fixed-width text report.
    pub fn report(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_report(&mut out);
        out
    }

    fn write_report(&self, out: &mut String) -> fmt::Result {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let total = self.warp_instructions.max(1) as f64;
        let pct = |n: u64| (n as f64 / total) * 100.0;

        writeln!(out, "==========================================================")?;
        writeln!(out, "SIMX SIMULATION STATISTICS")?;
        writeln!(out, "==========================================================")?;
        writeln!(out, "host_seconds             {seconds:.4} s")?;
        writeln!(out, "sim_cycles               {}", self.cycles)?;
        writeln!(out, "sim_warp_insts           {}", self.warp_instructions)?;
        writeln!(out, "sim_thread_insts         {}", self.thread_instructions)?;
        writeln!(
            out,
            "sim_ipc                  {:.4}",
            self.warp_instructions as f64 / cyc
        )?;
        writeln!(out, "simt_lanes_per_inst      {:.2}", self.simt_efficiency())?;
        writeln!(out, "warps_spawned            {}", self.warps_spawned)?;
        writeln!(out, "----------------------------------------------------------")?;
        writeln!(out, "INSTRUCTION MIX")?;
        let mix = [
            ("op.alu", self.inst_alu),
            ("op.mul_div", self.inst_mul_div),
            ("op.load", self.inst_load),
            ("op.store", self.inst_store),
            ("op.branch", self.inst_branch),
            ("op.jump", self.inst_jump),
            ("op.system", self.inst_system),
            ("op.gpu", self.inst_gpu),
        ];
        for (name, count) in mix {
            writeln!(out, "  {name:<22} {count} ({:.2}%)", pct(count))?;
        }
        writeln!(out, "==========================================================")
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        print!("{}", self.report());
    }
}
