use thiserror::Error;

use crate::{boundary, collision, stream};

/// Errors that can occur when building or stepping a simulation.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("collision error: {0}")]
    Collision(#[from] collision::Error),

    #[error("stream error: {0}")]
    Stream(#[from] stream::Error),

    #[error("boundary error: {0}")]
    Boundary(#[from] boundary::Error),

    #[error("{operator} operator covers {actual} nodes but the lattice has {expected}")]
    OperatorSize {
        operator: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("fluid field has {actual} nodes but the lattice has {expected}")]
    FieldLength { expected: usize, actual: usize },

    #[error("{operator} was built for a {actual:?} grid but the lattice is {expected:?}")]
    GridMismatch {
        operator: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },
}
