//! Core circuit representation and complex MNA structures for fasor.
//!
//! This crate provides the fundamental data structures for single-frequency
//! AC circuit analysis: the component sum type, deterministic node and
//! branch indexing, the complex Modified Nodal Analysis (MNA) system, and
//! per-component stamp contributions.

pub mod component;
pub mod error;
pub mod index;
pub mod mna;
pub mod node;
pub mod stamp;
pub mod units;

pub use component::{probe_name, sense_node_name, Component};
pub use error::{Error, Result};
pub use index::CircuitIndex;
pub use mna::{AcSystem, Contribution};
pub use node::NodeId;
