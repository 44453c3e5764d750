//! Capability traits for observers.
//!
//! These traits abstract over the simulation's event and action types so the
//! observers in this crate can be written once and used with any run loop
//! whose events carry a fluid field.
//!
//! # Event traits
//!
//! - [`HasField`]: events that carry the step number and fluid field
//!
//! # Action traits
//!
//! - [`CanStopEarly`]: actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use lbm2d_core::Observer;
//! use lbm2d_observers::traits::{CanStopEarly, HasField};
//!
//! struct SpeedLimit {
//!     max_speed: f64,
//! }
//!
//! impl<E: HasField, A: CanStopEarly> Observer<E, A> for SpeedLimit {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.field().max_speed() > self.max_speed).then(A::stop_early)
//!     }
//! }
//! ```

use lbm2d_core::FluidField;
use lbm2d_solvers::simulation;

/// An event that carries the macroscopic state of the fluid.
pub trait HasField {
    /// Returns the number of steps taken when the event was emitted.
    fn step(&self) -> usize;

    /// Returns the pressure and velocity at every node.
    fn field(&self) -> &FluidField;

    /// Returns the density at every node.
    fn density(&self) -> &[f64];
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the run early.
    fn stop_early() -> Self;
}

impl HasField for simulation::Event<'_> {
    fn step(&self) -> usize {
        self.step
    }

    fn field(&self) -> &FluidField {
        self.field
    }

    fn density(&self) -> &[f64] {
        self.density
    }
}

impl CanStopEarly for simulation::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
