//! Lid-driven cavity setup for the `lbm2d` driver program.
//!
//! - [`config`]: the TOML-backed [`CavityConfig`]
//! - [`cavity`]: building the walls, the moving lid, and the simulation

pub mod cavity;
pub mod config;

pub use config::{CavityConfig, CollisionKind, WallKind};
