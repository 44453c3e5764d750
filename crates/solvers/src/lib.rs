//! Lattice Boltzmann operators and the time-stepping driver.
//!
//! # Modules
//!
//! - [`collision`]: BGK and MRT relaxation toward equilibrium, plus the
//!   macroscopic density, pressure, and velocity update
//! - [`stream`]: propagation of distribution values to neighboring nodes
//! - [`boundary`]: bounceback (full-way and half-way) and Zou/He nodes
//! - [`simulation`]: the per-step driver and its observer-driven run loop
//!
//! # Order of operations
//!
//! Each step runs: equilibrium → collide → pre-stream boundaries → stream →
//! during/post-stream boundaries → macroscopic update. See
//! [`Simulation::step`](simulation::Simulation::step).

pub mod boundary;
pub mod collision;
pub mod simulation;
pub mod stream;

pub use boundary::Boundary;
pub use collision::{Collision, CollisionModel, InitialDensity};
pub use simulation::Simulation;
pub use stream::Stream;
