use thiserror::Error;

/// Errors that can occur when placing or updating boundary nodes.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("node ({x}, {y}) is not on a side or corner of the domain")]
    InvalidBoundaryGeometry { x: usize, y: usize },

    #[error("node ({x}, {y}) is outside the {nx} x {ny} grid")]
    NodeOutOfBounds {
        x: usize,
        y: usize,
        nx: usize,
        ny: usize,
    },

    #[error("density cannot be prescribed on corner node ({x}, {y})")]
    UnsupportedDensityCorner { x: usize, y: usize },

    #[error("boundaries require a D2Q9 lattice, got {dimensions} dimensions and {directions} directions")]
    UnsupportedLattice { dimensions: usize, directions: usize },
}
