//! Stepping controller.
//!
//! Advances simulated time in one of two modes:
//! 1. **Run to completion:** Delegate to the processor until the program terminates.
//! 2. **Bounded:** Advance one cycle at a time, up to a budget, stopping early as soon as
//!    the processor reports that the program is no longer live.
//!
//! The raw `0 = unbounded` cycle count used by harnesses is converted to a
//! [`StepBudget`] at the boundary by [`StepBudget::from_raw`].

use std::num::NonZeroU64;

use simx_core::ProcessorModel;
use tracing::{debug, trace};

use crate::error::Result;
use crate::session::{InstanceFactory, Session};

/// How far a single [`Session::step`] call may advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepBudget {
    /// Run until the simulated program terminates.
    RunToCompletion,
    /// Advance at most this many cycles.
    Cycles(NonZeroU64),
}

impl StepBudget {
    /// Converts a harness cycle count, where zero means "unbounded".
    ///
    /// # Examples
    ///
    /// ```
    /// use simx_bridge::StepBudget;
    ///
    /// assert_eq!(StepBudget::from_raw(0), StepBudget::RunToCompletion);
    /// assert!(matches!(StepBudget::from_raw(100), StepBudget::Cycles(n) if n.get() == 100));
    /// ```
    pub fn from_raw(cycles: u64) -> Self {
        NonZeroU64::new(cycles).map_or(Self::RunToCompletion, Self::Cycles)
    }
}

impl From<u64> for StepBudget {
    fn from(cycles: u64) -> Self {
        Self::from_raw(cycles)
    }
}

/// Whether the simulated program is still running after a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepStatus {
    /// The program terminated, or there is no instance.
    Finished,
    /// The cycle budget ran out while the program was still live.
    Running,
}

impl StepStatus {
    /// Whether the program is still running.
    pub fn is_running(self) -> bool {
        self == Self::Running
    }

    /// Status code reported across the C boundary: `1` running, `0` finished.
    pub fn as_raw(self) -> i32 {
        match self {
            Self::Finished => 0,
            Self::Running => 1,
        }
    }
}

impl<F: InstanceFactory> Session<F> {
    /// Advances the simulation.
    ///
    /// Without an instance this does nothing and reports
    /// [`StepStatus::Finished`], so a harness polling for completion
    /// terminates instead of faulting.
    ///
    /// # Arguments
    ///
    /// * `budget` - Run to completion, or at most `n` cycles
    ///
    /// # Returns
    ///
    /// [`StepStatus::Running`] only when a bounded budget was exhausted with
    /// the program still live.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Sim`](crate::BridgeError::Sim) if the processor
    /// faults. The instance is left in whatever state the fault produced.
    pub fn step(&mut self, budget: StepBudget) -> Result<StepStatus> {
        let Some(inst) = self.instance.as_mut() else {
            return Ok(StepStatus::Finished);
        };

        match budget {
            StepBudget::RunToCompletion => {
                let code = inst.processor.run(&mut inst.memory)?;
                inst.exit_code = Some(code);
                debug!(
                    exit_code = code,
                    cycles = inst.processor.cycles(),
                    "run to completion finished"
                );
                Ok(StepStatus::Finished)
            }
            StepBudget::Cycles(n) => {
                for _ in 0..n.get() {
                    if !inst.processor.tick(&mut inst.memory)? {
                        if let Some(code) = inst.processor.exit_code() {
                            inst.exit_code = Some(code);
                        }
                        trace!(cycles = inst.processor.cycles(), "program no longer live");
                        return Ok(StepStatus::Finished);
                    }
                }
                Ok(StepStatus::Running)
            }
        }
    }
}
