//! Node identifiers for circuit graphs.

use std::fmt;

/// Name of the distinguished ground node.
pub const GROUND_NAME: &str = "0";

/// Identifier for a node in the circuit.
///
/// Nodes are named by arbitrary strings taken from the netlist; `"0"` is
/// reserved for ground, which is fixed at 0 V and excluded from the
/// unknown vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node identifier from a raw name.
    pub fn new(name: impl Into<String>) -> Self {
        NodeId(name.into())
    }

    /// The ground node.
    pub fn ground() -> Self {
        NodeId(GROUND_NAME.to_string())
    }

    /// Get the raw node name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is the ground node.
    pub fn is_ground(&self) -> bool {
        self.0 == GROUND_NAME
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(name: &str) -> Self {
        NodeId::new(name)
    }
}
