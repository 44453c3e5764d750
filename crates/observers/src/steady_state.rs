use lbm2d_core::{Observer, moments};

use crate::traits::{CanStopEarly, HasField};

/// Stops a run once the velocity field has reached steady state.
///
/// The velocity of every event is compared with the velocity of the event
/// before it. Every `interval` steps the change is checked against the
/// tolerance with [`moments::check_steady_state`], and the run is stopped
/// if it is below it. The relative L2 change of every step is logged at
/// debug level.
#[derive(Debug, Clone)]
pub struct SteadyState {
    tolerance: f64,
    interval: usize,
    previous: Option<Vec<[f64; 2]>>,
    last_error: Option<f64>,
    converged_at: Option<usize>,
}

impl SteadyState {
    /// Creates an observer that checks for steady state every `interval` steps.
    ///
    /// An `interval` of zero is treated as one.
    #[must_use]
    pub fn new(tolerance: f64, interval: usize) -> Self {
        Self {
            tolerance,
            interval: interval.max(1),
            previous: None,
            last_error: None,
            converged_at: None,
        }
    }

    /// Returns the relative L2 change of the most recent step.
    #[must_use]
    pub fn last_error(&self) -> Option<f64> {
        self.last_error
    }

    /// Returns the step at which steady state was detected.
    #[must_use]
    pub fn converged_at(&self) -> Option<usize> {
        self.converged_at
    }

    fn check(&mut self, step: usize, prev: &[[f64; 2]], curr: &[[f64; 2]]) -> bool {
        match moments::relative_error(prev, curr) {
            Ok(error) => {
                log::debug!("step {step}: velocity change {error:.6e}");
                self.last_error = Some(error);
            }
            Err(err) => {
                log::warn!("step {step}: {err}");
                return false;
            }
        }

        if step % self.interval != 0 {
            return false;
        }
        moments::check_steady_state(prev, curr, self.tolerance).unwrap_or(false)
    }
}

impl<E: HasField, A: CanStopEarly> Observer<E, A> for SteadyState {
    fn observe(&mut self, event: &E) -> Option<A> {
        let step = event.step();
        let curr = &event.field().velocity;

        let steady = match self.previous.take() {
            Some(prev) if step > 0 => self.check(step, &prev, curr),
            _ => false,
        };
        self.previous = Some(curr.clone());

        if steady {
            log::info!("steady state reached at step {step}");
            self.converged_at = Some(step);
            return Some(A::stop_early());
        }
        None
    }
}
