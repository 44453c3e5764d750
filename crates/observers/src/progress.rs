use lbm2d_core::Observer;

use crate::traits::HasField;

/// Logs the progress of a run every `interval` steps.
///
/// Each report gives the step, the largest velocity magnitude, and the total
/// mass. Never requests an action.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    interval: usize,
}

impl Progress {
    /// Creates an observer that reports every `interval` steps.
    ///
    /// An `interval` of zero is treated as one.
    #[must_use]
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
        }
    }

    /// Returns `true` if `step` is reported.
    #[must_use]
    pub fn reports(&self, step: usize) -> bool {
        step % self.interval == 0
    }
}

impl<E: HasField, A> Observer<E, A> for Progress {
    fn observe(&mut self, event: &E) -> Option<A> {
        let step = event.step();
        if self.reports(step) {
            let mass: f64 = event.density().iter().sum();
            log::info!(
                "step {step}: max speed = {:.6e}, mass = {mass:.6}",
                event.field().max_speed()
            );
        }
        None
    }
}
