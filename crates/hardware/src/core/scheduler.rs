//! Round-robin warp scheduler.

use crate::core::warp::Warp;

/// Selects the next active warp of a core, rotating fairly among them.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    next: usize,
}

impl Scheduler {
    /// Restarts the rotation at warp 0.
    pub fn reset(&mut self) {
        self.next = 0;
    }

    /// Picks the first active warp at or after the rotation point.
    ///
    /// # Returns
    ///
    /// The index of the chosen warp, or `None` when every warp is inactive.
    pub fn pick(&mut self, warps: &[Warp]) -> Option<usize> {
        let n = warps.len();
        let chosen = (0..n)
            .map(|offset| (self.next + offset) % n)
            .find(|&idx| warps[idx].is_active())?;
        self.next = (chosen + 1) % n;
        Some(chosen)
    }
}
