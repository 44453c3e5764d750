//! Reusable observers for lbm2d simulations.
//!
//! This crate provides [`Observer`] implementations that work with any event
//! carrying a fluid field (see [`traits`]):
//!
//! - [`SteadyState`]: stops the run once the velocity field stops changing
//! - [`Progress`]: logs the run's progress at a fixed interval
//! - [`VtkWriter`]: writes the fluid state to legacy VTK files
//!
//! [`Observer`]: lbm2d_core::Observer

pub mod traits;
pub mod vtk;

mod progress;
mod steady_state;

pub use progress::Progress;
pub use steady_state::SteadyState;
pub use vtk::VtkWriter;
