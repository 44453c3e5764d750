//! The lattice Boltzmann time-stepping driver.
//!
//! A [`Simulation`] owns the distribution grid and the operators that act on
//! it. Each call to [`Simulation::step`] advances the grid by one time step:
//!
//! 1. Recompute the equilibrium distribution from the current density and
//!    velocity.
//! 2. Collide.
//! 3. Run the node update of every pre-stream boundary, in registration order.
//! 4. Stream into a second buffer and swap.
//! 5. For each boundary in registration order, run its stream update if it
//!    modifies streamed values, then its node update if it is not pre-stream.
//! 6. Recompute density, pressure, and velocity.
//!
//! [`Simulation::run`] repeats this for a number of steps and reports each
//! state to an [`Observer`], which may stop the run early.
//!
//! # Example
//!
//! ```
//! use lbm2d_core::{FluidField, Topology};
//! use lbm2d_solvers::{
//!     Collision, Simulation, Stream,
//!     boundary::Bounceback,
//!     simulation::{Action, Event, Status},
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let topology = Topology::d2q9(8, 8, 1.0, 1.0)?;
//! let collision = Collision::bgk(&topology, 0.1, 1.0)?;
//! let stream = Stream::new(&topology)?;
//! let field = FluidField::uniform(&topology, [0.0, 0.0]);
//! let mut sim = Simulation::new(topology, collision, stream, field)?;
//!
//! let mut walls = Bounceback::full_way(&topology)?;
//! for x in 0..8 {
//!     walls.add_node(x, 0)?;
//!     walls.add_node(x, 7)?;
//! }
//! for y in 1..7 {
//!     walls.add_node(0, y)?;
//!     walls.add_node(7, y)?;
//! }
//! sim.add_boundary(walls)?;
//!
//! let solution = sim.run(20, |event: &Event<'_>| -> Option<Action> {
//!     (event.step == 5).then_some(Action::StopEarly)
//! })?;
//! assert_eq!(solution.status, Status::StoppedByObserver);
//! assert!(sim.field().max_speed() < 1e-12);
//! # Ok(())
//! # }
//! ```

mod action;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use lbm2d_core::{Distribution, FluidField, Observer, Topology};

use crate::{
    Boundary, Collision, Stream,
    boundary::{Context, Pass},
};

/// A lattice Boltzmann simulation on a rectangular D2Q9 grid.
#[derive(Debug, Clone)]
pub struct Simulation {
    topology: Topology,
    collision: Collision,
    stream: Stream,
    boundaries: Vec<Boundary>,
    field: FluidField,
    df: Vec<Distribution>,
    scratch: Vec<Distribution>,
    steps_taken: usize,
}

impl Simulation {
    /// Creates a simulation with its distribution at equilibrium.
    ///
    /// The equilibrium is computed from the collision operator's initial
    /// density and the velocity in `field`, and the macroscopic properties are
    /// then derived from it, so the field's pressure is populated on return.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GridMismatch`] if the stream operator was built for a
    /// grid of another shape, [`Error::OperatorSize`] if the collision operator
    /// covers another number of nodes, or [`Error::FieldLength`] if `field`
    /// does not cover every node.
    pub fn new(
        topology: Topology,
        mut collision: Collision,
        stream: Stream,
        mut field: FluidField,
    ) -> Result<Self, Error> {
        let grid = (topology.nx(), topology.ny());
        if stream.grid() != grid {
            return Err(Error::GridMismatch {
                operator: "stream",
                expected: grid,
                actual: stream.grid(),
            });
        }
        let nodes = topology.node_count();
        if collision.density().len() != nodes {
            return Err(Error::OperatorSize {
                operator: "collision",
                expected: nodes,
                actual: collision.density().len(),
            });
        }
        if field.len() != nodes {
            return Err(Error::FieldLength {
                expected: nodes,
                actual: field.len(),
            });
        }

        collision.compute_equilibrium(&field);
        let df = collision.equilibrium().to_vec();
        collision.compute_macroscopic_properties(&df, &mut field);
        log::debug!(
            "simulation on a {} x {} grid, tau = {}",
            topology.nx(),
            topology.ny(),
            collision.tau()
        );

        Ok(Self {
            topology,
            collision,
            stream,
            boundaries: Vec::new(),
            field,
            scratch: df.clone(),
            df,
            steps_taken: 0,
        })
    }

    /// Registers a boundary.
    ///
    /// Full-way bounceback nodes are excluded from collision from now on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GridMismatch`] if the boundary was built for a grid of
    /// another shape.
    pub fn add_boundary(&mut self, boundary: impl Into<Boundary>) -> Result<(), Error> {
        let boundary = boundary.into();
        let grid = (self.topology.nx(), self.topology.ny());
        if boundary.grid() != grid {
            return Err(Error::GridMismatch {
                operator: "boundary",
                expected: grid,
                actual: boundary.grid(),
            });
        }

        let solid = boundary.solid_nodes();
        for &n in &solid {
            self.collision.add_node_to_skip(n);
        }
        log::debug!(
            "added boundary with {} nodes ({} solid)",
            boundary.nodes().len(),
            solid.len()
        );

        self.boundaries.push(boundary);
        Ok(())
    }

    /// Advances the simulation by one time step.
    ///
    /// # Errors
    ///
    /// Returns an error if a boundary fails to update. The distribution is
    /// left partially updated and the simulation should not be stepped again.
    pub fn step(&mut self) -> Result<(), Error> {
        self.collision.compute_equilibrium(&self.field);
        self.collision.collide(&mut self.df);

        let ctx = Context {
            density: self.collision.density(),
            velocity: &self.field.velocity,
        };

        for boundary in self.boundaries.iter_mut().filter(|b| b.is_prestream()) {
            boundary.update(&mut self.df, Pass::Node, &ctx)?;
        }

        self.stream.stream_into(&self.df, &mut self.scratch);
        std::mem::swap(&mut self.df, &mut self.scratch);

        for boundary in &mut self.boundaries {
            if boundary.is_during_stream() {
                boundary.update(&mut self.df, Pass::Stream, &ctx)?;
            }
            if !boundary.is_prestream() {
                boundary.update(&mut self.df, Pass::Node, &ctx)?;
            }
        }

        self.collision
            .compute_macroscopic_properties(&self.df, &mut self.field);
        self.steps_taken += 1;
        log::trace!("completed step {}", self.steps_taken);
        Ok(())
    }

    /// Runs up to `steps` steps, reporting each state to `observer`.
    ///
    /// The observer first receives the current state, then the state after
    /// every step, and may return [`Action::StopEarly`] to end the run.
    ///
    /// # Errors
    ///
    /// Returns an error if any step fails.
    pub fn run<Obs>(&mut self, steps: usize, mut observer: Obs) -> Result<Solution, Error>
    where
        Obs: for<'a> Observer<Event<'a>, Action>,
    {
        if let Some(Action::StopEarly) = observer.observe(&self.event()) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                steps: 0,
            });
        }

        for step in 1..=steps {
            self.step()?;

            if let Some(Action::StopEarly) = observer.observe(&self.event()) {
                log::debug!("run stopped by observer after {step} steps");
                return Ok(Solution {
                    status: Status::StoppedByObserver,
                    steps: step,
                });
            }
        }

        Ok(Solution {
            status: Status::Complete,
            steps,
        })
    }

    /// Runs `steps` steps without observation.
    ///
    /// # Errors
    ///
    /// Returns an error if any step fails.
    pub fn run_unobserved(&mut self, steps: usize) -> Result<Solution, Error> {
        self.run(steps, ())
    }

    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    #[must_use]
    pub fn collision(&self) -> &Collision {
        &self.collision
    }

    #[must_use]
    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    /// Returns the pressure and velocity after the last step.
    #[must_use]
    pub fn field(&self) -> &FluidField {
        &self.field
    }

    /// Returns the density after the last step.
    #[must_use]
    pub fn density(&self) -> &[f64] {
        self.collision.density()
    }

    /// Returns the distribution grid after the last step.
    #[must_use]
    pub fn distributions(&self) -> &[Distribution] {
        &self.df
    }

    #[must_use]
    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    fn event(&self) -> Event<'_> {
        Event {
            step: self.steps_taken,
            field: &self.field,
            density: self.collision.density(),
        }
    }
}
