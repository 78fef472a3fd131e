//! Error types for fasor-solver.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("singular system: {0}")]
    SingularSystem(String),

    #[error("invalid matrix dimensions: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Circuit(#[from] fasor_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
