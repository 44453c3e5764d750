use thiserror::Error;

use crate::{D2Q9, Q};

/// Grid topology of a lattice: node counts, step sizes, and lattice speed.
///
/// Nodes are indexed row-major, `n = y * nx + x`, so the x index varies
/// fastest. A topology is immutable once constructed and every constructor
/// validates its input, so a `Topology` value always describes a usable grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Topology {
    nx: usize,
    ny: usize,
    nz: usize,
    dimensions: usize,
    directions: usize,
    space_step: f64,
    time_step: f64,
}

/// Errors that can occur when validating a topology.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("number of dimensions must be non-zero")]
    Dimensions,

    #[error("number of directions must be non-zero")]
    Directions,

    #[error("grid size must be non-zero along every axis, got {nx} x {ny} x {nz}")]
    GridSize { nx: usize, ny: usize, nz: usize },

    #[error("space step must be finite and positive, got {0}")]
    SpaceStep(f64),

    #[error("time step must be finite and positive, got {0}")]
    TimeStep(f64),
}

impl Topology {
    /// Creates a 2D topology.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any count is zero or a step is not
    /// finite and positive.
    pub fn new(
        nx: usize,
        ny: usize,
        dimensions: usize,
        directions: usize,
        space_step: f64,
        time_step: f64,
    ) -> Result<Self, ConfigError> {
        Self::new_3d(nx, ny, 1, dimensions, directions, space_step, time_step)
    }

    /// Creates a 3D topology.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any count is zero or a step is not
    /// finite and positive.
    pub fn new_3d(
        nx: usize,
        ny: usize,
        nz: usize,
        dimensions: usize,
        directions: usize,
        space_step: f64,
        time_step: f64,
    ) -> Result<Self, ConfigError> {
        let topology = Self {
            nx,
            ny,
            nz,
            dimensions,
            directions,
            space_step,
            time_step,
        };
        topology.check_input()?;
        Ok(topology)
    }

    /// Creates a 2D topology for the D2Q9 velocity set.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either axis is empty or a step is not
    /// finite and positive.
    pub fn d2q9(nx: usize, ny: usize, space_step: f64, time_step: f64) -> Result<Self, ConfigError> {
        Self::new(nx, ny, 2, Q, space_step, time_step)
    }

    /// Checks that the configuration describes a usable lattice.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, checking counts before step sizes.
    pub fn check_input(&self) -> Result<(), ConfigError> {
        if self.dimensions == 0 {
            return Err(ConfigError::Dimensions);
        }
        if self.directions == 0 {
            return Err(ConfigError::Directions);
        }
        if self.nx == 0 || self.ny == 0 || self.nz == 0 {
            return Err(ConfigError::GridSize {
                nx: self.nx,
                ny: self.ny,
                nz: self.nz,
            });
        }
        if !self.space_step.is_finite() || self.space_step <= 0.0 {
            return Err(ConfigError::SpaceStep(self.space_step));
        }
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(ConfigError::TimeStep(self.time_step));
        }
        Ok(())
    }

    /// Returns the number of nodes along x.
    #[must_use]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Returns the number of nodes along y.
    #[must_use]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Returns the number of nodes along z, which is 1 for 2D topologies.
    #[must_use]
    pub fn nz(&self) -> usize {
        self.nz
    }

    /// Returns the number of spatial dimensions.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Returns the number of discrete directions.
    #[must_use]
    pub fn directions(&self) -> usize {
        self.directions
    }

    /// Returns the space step `dl`.
    #[must_use]
    pub fn space_step(&self) -> f64 {
        self.space_step
    }

    /// Returns the time step `dt`.
    #[must_use]
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Returns the lattice speed `c = dl / dt`.
    #[must_use]
    pub fn lattice_speed(&self) -> f64 {
        self.space_step / self.time_step
    }

    /// Returns the total number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Returns `true` if this topology can be driven by the D2Q9 solver.
    #[must_use]
    pub fn is_d2q9(&self) -> bool {
        self.dimensions == 2 && self.directions == Q && self.nz == 1
    }

    /// Returns the D2Q9 velocity set scaled by this topology's lattice speed.
    #[must_use]
    pub fn d2q9_lattice(&self) -> D2Q9 {
        D2Q9::new(self.lattice_speed())
    }

    /// Returns the linear index of the node at `(x, y)`.
    #[must_use]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.nx + x
    }

    /// Returns the `(x, y)` coordinates of the node at linear index `n`.
    #[must_use]
    pub fn coordinates(&self, n: usize) -> (usize, usize) {
        (n % self.nx, n / self.nx)
    }

    /// Returns `true` if `(x, y)` lies on the grid.
    #[must_use]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.nx && y < self.ny
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn accessors_report_construction_values() {
        let topology = Topology::d2q9(8, 5, 0.5, 0.25).unwrap();

        assert_eq!(topology.nx(), 8);
        assert_eq!(topology.ny(), 5);
        assert_eq!(topology.nz(), 1);
        assert_eq!(topology.dimensions(), 2);
        assert_eq!(topology.directions(), 9);
        assert_eq!(topology.node_count(), 40);
        assert_relative_eq!(topology.space_step(), 0.5);
        assert_relative_eq!(topology.time_step(), 0.25);
        assert_relative_eq!(topology.lattice_speed(), 2.0);
        assert!(topology.is_d2q9());
    }

    #[test]
    fn index_is_row_major() {
        let topology = Topology::d2q9(4, 3, 1.0, 1.0).unwrap();

        assert_eq!(topology.index(0, 0), 0);
        assert_eq!(topology.index(3, 0), 3);
        assert_eq!(topology.index(0, 1), 4);
        assert_eq!(topology.index(2, 2), 10);
        assert_eq!(topology.coordinates(10), (2, 2));
        assert!(topology.contains(3, 2));
        assert!(!topology.contains(4, 0));
        assert!(!topology.contains(0, 3));
    }

    #[test]
    fn rejects_zero_counts() {
        assert_eq!(
            Topology::new(4, 4, 0, 9, 1.0, 1.0),
            Err(ConfigError::Dimensions)
        );
        assert_eq!(
            Topology::new(4, 4, 2, 0, 1.0, 1.0),
            Err(ConfigError::Directions)
        );
        assert_eq!(
            Topology::d2q9(0, 4, 1.0, 1.0),
            Err(ConfigError::GridSize { nx: 0, ny: 4, nz: 1 })
        );
        assert_eq!(
            Topology::new_3d(4, 4, 0, 3, 19, 1.0, 1.0),
            Err(ConfigError::GridSize { nx: 4, ny: 4, nz: 0 })
        );
    }

    #[test]
    fn rejects_bad_steps() {
        assert_eq!(
            Topology::d2q9(4, 4, 0.0, 1.0),
            Err(ConfigError::SpaceStep(0.0))
        );
        assert_eq!(
            Topology::d2q9(4, 4, 1.0, -1.0),
            Err(ConfigError::TimeStep(-1.0))
        );
        assert!(matches!(
            Topology::d2q9(4, 4, f64::NAN, 1.0),
            Err(ConfigError::SpaceStep(_))
        ));
    }

    #[test]
    fn three_dimensional_topology_is_not_d2q9() {
        let topology = Topology::new_3d(4, 4, 4, 3, 19, 1.0, 1.0).unwrap();
        assert_eq!(topology.node_count(), 64);
        assert!(!topology.is_d2q9());
    }
}
