//! AC analysis engine for fasor.
//!
//! Solves the complex MNA system assembled from a component list at a
//! single frequency and derives node voltages, branch currents, complex
//! powers, the equivalent impedance seen by the source, and three-phase
//! motor aggregates.

pub mod engine;
pub mod error;
pub mod linear;
pub mod results;

pub use engine::analyze;
pub use error::{Error, Result};
pub use linear::solve_complex;
pub use results::{AcAnalysis, Connection, Power, ThreePhaseSummary, EPSILON};
