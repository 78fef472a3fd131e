//! # Fasor
//!
//! A single-frequency AC circuit analyzer built on Modified Nodal
//! Analysis (MNA).
//!
//! Fasor turns a netlist of components into a complex linear system and
//! solves it for:
//! - node voltage phasors
//! - component branch currents
//! - complex powers with power-factor and leading/lagging annotation
//! - the equivalent impedance seen by the source
//! - three-phase motor aggregates (star and delta)
//!
//! ## Quick Start
//!
//! ```rust
//! use fasor::prelude::*;
//!
//! let components = fasor::parse(
//!     "* voltage divider\n\
//!      V1 in 0 AC 100 0\n\
//!      R1 in out 40\n\
//!      R2 out 0 60\n",
//! )
//! .unwrap();
//!
//! let result = fasor::analyze(&components, 60.0).unwrap();
//! assert!((result.node_voltages["out"].re - 60.0).abs() < 1e-9);
//! ```

// Re-export the member crates
pub use fasor_core as core;
pub use fasor_parser as parser;
pub use fasor_solver as solver;

// ============================================================================
// Convenient re-exports from fasor_core
// ============================================================================

pub use fasor_core::{
    // Circuit representation
    AcSystem,
    CircuitIndex,
    Component,
    Contribution,
    // Errors
    Error as CoreError,
    NodeId,
};

// ============================================================================
// Convenient re-exports from fasor_parser
// ============================================================================

pub use fasor_parser::{
    // Errors
    Error as ParseError,
    // Main parse function
    parse,
};

// ============================================================================
// Convenient re-exports from fasor_solver
// ============================================================================

pub use fasor_solver::{
    // Results
    AcAnalysis,
    Connection,
    // Errors
    Error as SolverError,
    Power,
    ThreePhaseSummary,
    // Analysis entry point
    analyze,
    // Linear algebra
    solve_complex,
};

// ============================================================================
// Re-export commonly used external types
// ============================================================================

/// Re-export of nalgebra's dynamic vector type.
pub use nalgebra::DVector;

/// Re-export of nalgebra's dynamic matrix type.
pub use nalgebra::DMatrix;

/// Re-export of num_complex's Complex type.
pub use num_complex::Complex;

// ============================================================================
// Prelude module for convenient imports
// ============================================================================

/// Prelude module containing commonly used types.
///
/// ```rust
/// use fasor::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::{AcSystem, CircuitIndex, Component, NodeId};

    // Parser
    pub use crate::parse;

    // Solver
    pub use crate::{AcAnalysis, Connection, Power, ThreePhaseSummary, analyze};

    // Common external types
    pub use crate::{Complex, DMatrix, DVector};
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_simple_circuit() {
        let netlist = "V1 1 0 AC 5\nR1 1 0 1k\n.end\n";
        let result = parse(netlist);
        assert!(result.is_ok());
    }

    #[test]
    fn test_end_to_end() {
        let components = parse("V1 a 0 AC 10\nR1 a 0 5\n").unwrap();
        let result = analyze(&components, 60.0).unwrap();
        assert_relative_eq!(result.currents["R1"].re, 2.0, epsilon = 1e-9);
        assert_relative_eq!(result.currents["R1"].im, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_prelude_imports() {
        use crate::prelude::*;

        let gnd: NodeId = NodeId::ground();
        assert!(gnd.is_ground());
        let _: Complex<f64> = Complex::new(1.0, -1.0);
    }
}
