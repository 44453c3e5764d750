//! Core types for the lbm2d lattice Boltzmann solver.
//!
//! This crate defines the shared data that the solver, observers, and driver
//! programs build on:
//!
//! - [`D2Q9`]: the discrete velocity set, weights, and moment matrices
//! - [`Topology`]: grid dimensions, space/time step, and lattice speed
//! - [`FluidField`]: macroscopic pressure and velocity per node
//! - [`moments`]: moment, product, and convergence helpers
//! - [`Observer`]: receives solver events and optionally returns control actions

pub mod lattice;
pub mod moments;

mod field;
mod observer;
mod topology;

pub use field::FluidField;
pub use lattice::{D2Q9, Distribution, Q};
pub use moments::DimensionMismatch;
pub use observer::Observer;
pub use topology::{ConfigError, Topology};
