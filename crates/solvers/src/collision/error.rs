use thiserror::Error;

/// Errors that can occur when constructing a collision operator.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("relaxation time {tau} is degenerate for kinematic viscosity {viscosity}")]
    DegenerateRelaxation { viscosity: f64, tau: f64 },

    #[error("collision requires a D2Q9 lattice, got {dimensions} dimensions and {directions} directions")]
    UnsupportedLattice { dimensions: usize, directions: usize },

    #[error("initial density has {actual} values but the lattice has {expected} nodes")]
    DensityLength { expected: usize, actual: usize },
}
