use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when writing VTK output.
#[derive(Debug, Error)]
pub enum Error {
    #[error("field has {pressure} pressures and {velocity} velocities but the grid has {expected} nodes")]
    FieldLength {
        expected: usize,
        pressure: usize,
        velocity: usize,
    },

    #[error("failed to prepare output directory {}", path.display())]
    Prepare {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
