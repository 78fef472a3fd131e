//! Netlist parser for fasor.
//!
//! Parses a line-oriented netlist into the component list consumed by
//! the analysis engine. Three-phase motor lines expand into per-phase
//! impedances during parsing.
//!
//! # Example
//!
//! ```
//! use fasor_parser::parse;
//!
//! let components = parse(
//!     "* voltage divider\n\
//!      V1 in 0 AC 100 0\n\
//!      R1 in out 1k\n\
//!      R2 out 0 1k\n",
//! )
//! .unwrap();
//!
//! assert_eq!(components.len(), 3);
//! ```

pub mod error;
pub mod motor;
pub mod parser;

pub use error::{Error, Result};
pub use parser::parse;
