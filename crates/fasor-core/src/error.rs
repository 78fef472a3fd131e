//! Error types for fasor-core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{kind} '{name}' has zero impedance and cannot be stamped as an admittance")]
    ZeroImpedance { name: String, kind: &'static str },

    #[error("control source not found: {0}")]
    UnknownControlSource(String),

    #[error("invalid analysis frequency: {0} Hz (must be finite and positive)")]
    InvalidFrequency(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
