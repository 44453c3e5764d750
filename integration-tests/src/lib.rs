//! Shared scenarios for the integration tests.

use lbm2d_core::{FluidField, Topology};
use lbm2d_solvers::{
    Collision, CollisionModel, Simulation, Stream,
    boundary::{Bounceback, BouncebackScheme, ZouHe},
};

/// Builds a simulation on `topology` starting at unit density.
///
/// # Panics
///
/// Panics if the grid or viscosity is invalid.
#[must_use]
pub fn simulation(topology: &Topology, model: CollisionModel, viscosity: f64, field: FluidField) -> Simulation {
    let collision = Collision::new(topology, model, viscosity, 1.0).expect("valid collision");
    let stream = Stream::new(topology).expect("D2Q9 topology");
    Simulation::new(*topology, collision, stream, field).expect("field covers the grid")
}

/// Returns bounceback walls on every perimeter node.
///
/// # Panics
///
/// Panics if the topology is not D2Q9.
#[must_use]
pub fn closed_box(topology: &Topology, scheme: BouncebackScheme) -> Bounceback {
    let (nx, ny) = (topology.nx(), topology.ny());
    let mut walls = Bounceback::new(topology, scheme).expect("D2Q9 topology");
    for n in 0..topology.node_count() {
        let (x, y) = topology.coordinates(n);
        if x == 0 || y == 0 || x == nx - 1 || y == ny - 1 {
            walls.add_node(x, y).expect("node on the grid");
        }
    }
    walls
}

/// A clockwise swirl that vanishes on the perimeter.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn swirl(topology: &Topology, strength: f64) -> FluidField {
    let (cx, cy) = (
        (topology.nx() - 1) as f64 / 2.0,
        (topology.ny() - 1) as f64 / 2.0,
    );
    let velocity = (0..topology.node_count())
        .map(|n| {
            let (x, y) = topology.coordinates(n);
            if x == 0 || y == 0 || x == topology.nx() - 1 || y == topology.ny() - 1 {
                [0.0, 0.0]
            } else {
                [strength * (y as f64 - cy), -strength * (x as f64 - cx)]
            }
        })
        .collect();
    FluidField::from_velocity(velocity)
}

/// A channel flowing left to right.
///
/// The top and bottom rows are half-way bounceback walls. The interior of the
/// left column is a Zou/He velocity inlet, and the interior of the right column
/// is a Zou/He density outlet.
///
/// # Panics
///
/// Panics if the grid is smaller than 3 x 3 or not D2Q9.
#[must_use]
pub fn channel(topology: &Topology, inlet_velocity: f64, outlet_density: f64) -> (Bounceback, ZouHe, ZouHe) {
    let (nx, ny) = (topology.nx(), topology.ny());
    assert!(nx >= 3 && ny >= 3, "channel needs at least 3 x 3 nodes");

    let mut walls = Bounceback::half_way(topology).expect("D2Q9 topology");
    let mut inlet = ZouHe::new(topology).expect("D2Q9 topology");
    let mut outlet = ZouHe::new(topology).expect("D2Q9 topology");
    for x in 0..nx {
        walls.add_node(x, 0).expect("node on the grid");
        walls.add_node(x, ny - 1).expect("node on the grid");
    }
    for y in 1..ny - 1 {
        inlet
            .add_node(0, y, [inlet_velocity, 0.0])
            .expect("inlet on the left side");
        outlet
            .add_density_node(nx - 1, y, outlet_density)
            .expect("outlet on the right side");
    }
    (walls, inlet, outlet)
}

/// Returns the total mass on the lattice.
#[must_use]
pub fn total_mass(simulation: &Simulation) -> f64 {
    simulation.density().iter().sum()
}
