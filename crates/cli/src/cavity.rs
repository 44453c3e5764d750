//! The lid-driven cavity: a closed box whose top wall slides sideways.
//!
//! The left, right, and bottom walls are bounceback walls. The top row is a
//! Zou/He velocity boundary moving at the lid velocity; its two end nodes are
//! also wall nodes, and the lid update runs after the walls so the lid wins.

use anyhow::{Context, Result};
use lbm2d_core::{FluidField, Topology};
use lbm2d_solvers::{
    Collision, Simulation, Stream,
    boundary::{self, Bounceback, BouncebackScheme, ZouHe},
};

use crate::CavityConfig;

/// Lid speeds above this fraction of the lattice speed are outside the
/// low-Mach regime the method assumes.
const MAX_LID_MACH: f64 = 0.3;

/// Builds the cavity simulation described by `config`, starting at rest.
///
/// # Errors
///
/// Returns an error if the grid, viscosity, or density is invalid.
pub fn build(config: &CavityConfig) -> Result<Simulation> {
    config.validate()?;

    let topology = Topology::d2q9(config.nx, config.ny, config.space_step(), config.time_step)
        .context("invalid cavity grid")?;
    let collision = Collision::new(
        &topology,
        config.collision.into(),
        config.viscosity,
        config.density,
    )
    .context("invalid collision parameters")?;
    let stream = Stream::new(&topology)?;

    let [ux, uy] = config.lid_velocity;
    let c = topology.lattice_speed();
    if ux.hypot(uy) > MAX_LID_MACH * c {
        tracing::warn!(
            "lid speed {} exceeds {MAX_LID_MACH} of the lattice speed {c}",
            ux.hypot(uy)
        );
    }

    let field = FluidField::uniform(&topology, [0.0, 0.0]);
    let mut simulation = Simulation::new(topology, collision, stream, field)?;
    simulation.add_boundary(walls(&topology, config.walls.into())?)?;
    simulation.add_boundary(lid(&topology, config.lid_velocity)?)?;

    tracing::info!(
        "cavity {} x {}: {:?} collision, {:?} walls, tau = {:.4}",
        config.nx,
        config.ny,
        config.collision,
        config.walls,
        simulation.collision().tau()
    );
    Ok(simulation)
}

/// Returns wall nodes on the left and right columns and the bottom row.
///
/// # Errors
///
/// Returns an error if the topology is not D2Q9.
pub fn walls(topology: &Topology, scheme: BouncebackScheme) -> Result<Bounceback, boundary::Error> {
    let (nx, ny) = (topology.nx(), topology.ny());
    let mut walls = Bounceback::new(topology, scheme)?;
    for y in 0..ny {
        walls.add_node(0, y)?;
        if nx > 1 {
            walls.add_node(nx - 1, y)?;
        }
    }
    for x in 1..nx.saturating_sub(1) {
        walls.add_node(x, 0)?;
    }
    Ok(walls)
}

/// Returns the moving lid along the top row.
///
/// # Errors
///
/// Returns an error if the topology is not D2Q9.
pub fn lid(topology: &Topology, velocity: [f64; 2]) -> Result<ZouHe, boundary::Error> {
    let mut lid = ZouHe::new(topology)?;
    let top = topology.ny() - 1;
    for x in 0..topology.nx() {
        lid.add_node(x, top, velocity)?;
    }
    Ok(lid)
}
