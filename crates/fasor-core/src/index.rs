//! Deterministic node and branch-current indexing.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::component::{probe_name, Component};
use crate::node::NodeId;

/// Index assignment for the MNA unknown vector.
///
/// The unknown vector is `[V_1 .. V_N, J_1 .. J_M]`: first the non-ground
/// node voltages, then one branch current per voltage-defining element.
/// The assignment is a pure function of the component list:
/// - nodes are ordered by lexical sort of their names;
/// - branches are ordered by first appearance in the input list.
#[derive(Debug, Clone)]
pub struct CircuitIndex {
    nodes: BTreeMap<String, usize>,
    branches: IndexMap<String, usize>,
}

impl CircuitIndex {
    /// Build the index for a component list.
    pub fn new(components: &[Component]) -> Self {
        let mut names: Vec<&str> = components
            .iter()
            .flat_map(|c| c.nodes())
            .filter(|n| !n.is_ground())
            .map(|n| n.as_str())
            .collect();
        names.sort_unstable();
        names.dedup();

        let nodes = names
            .into_iter()
            .enumerate()
            .map(|(i, n)| (n.to_string(), i))
            .collect();

        let mut branches = IndexMap::new();
        for c in components {
            if c.is_voltage_defining() {
                let next = branches.len();
                branches.entry(c.name().to_string()).or_insert(next);
            }
        }

        Self { nodes, branches }
    }

    /// Number of non-ground nodes (N).
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of branch-current unknowns (M).
    pub fn num_branches(&self) -> usize {
        self.branches.len()
    }

    /// Matrix index of a node, `None` for ground.
    pub fn node(&self, node: &NodeId) -> Option<usize> {
        if node.is_ground() {
            None
        } else {
            self.nodes.get(node.as_str()).copied()
        }
    }

    /// Branch-current slot (0-based, before the `N` offset) of a
    /// voltage-defining element.
    pub fn branch(&self, name: &str) -> Option<usize> {
        self.branches.get(name).copied()
    }

    /// Absolute matrix row/column of a branch-current unknown.
    pub fn branch_row(&self, name: &str) -> Option<usize> {
        self.branch(name).map(|b| self.num_nodes() + b)
    }

    /// Absolute row of the branch current observing `control`.
    ///
    /// Resolves to the control element's own branch when it is
    /// voltage-defining, otherwise to its synthesized probe.
    pub fn control_branch_row(&self, control: &str) -> Option<usize> {
        self.branch_row(control)
            .or_else(|| self.branch_row(&probe_name(control)))
    }

    /// Iterate over `(node_name, index)` in index order.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, usize)> {
        self.nodes.iter().map(|(n, &i)| (n.as_str(), i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resistor(name: &str, p: &str, n: &str) -> Component {
        Component::Resistor {
            name: name.into(),
            node_pos: NodeId::new(p),
            node_neg: NodeId::new(n),
            resistance: 1.0,
        }
    }

    fn vsource(name: &str, p: &str, n: &str) -> Component {
        Component::VoltageSource {
            name: name.into(),
            node_pos: NodeId::new(p),
            node_neg: NodeId::new(n),
            magnitude: 1.0,
            phase_deg: 0.0,
        }
    }

    #[test]
    fn test_nodes_sorted_ground_excluded() {
        let comps = vec![resistor("R1", "b", "0"), resistor("R2", "a", "b")];
        let index = CircuitIndex::new(&comps);

        assert_eq!(index.num_nodes(), 2);
        assert_eq!(index.node(&NodeId::new("a")), Some(0));
        assert_eq!(index.node(&NodeId::new("b")), Some(1));
        assert_eq!(index.node(&NodeId::ground()), None);
    }

    #[test]
    fn test_branches_in_first_appearance_order() {
        let comps = vec![
            vsource("V2", "b", "0"),
            resistor("R1", "a", "b"),
            vsource("V1", "a", "0"),
        ];
        let index = CircuitIndex::new(&comps);

        assert_eq!(index.num_branches(), 2);
        assert_eq!(index.branch("V2"), Some(0));
        assert_eq!(index.branch("V1"), Some(1));
        assert_eq!(index.branch("R1"), None);
        assert_eq!(index.branch_row("V1"), Some(index.num_nodes() + 1));
    }

    #[test]
    fn test_control_terminals_are_indexed() {
        let comps = vec![Component::Vccs {
            name: "G1".into(),
            node_pos: NodeId::new("out"),
            node_neg: NodeId::ground(),
            ctrl_pos: NodeId::new("c"),
            ctrl_neg: NodeId::ground(),
            gain: 1.0,
        }];
        let index = CircuitIndex::new(&comps);

        // "c" appears only as a control terminal but still gets a row.
        assert_eq!(index.num_nodes(), 2);
        assert!(index.node(&NodeId::new("c")).is_some());
    }

    #[test]
    fn test_deterministic_rebuild() {
        let comps = vec![
            vsource("V1", "in", "0"),
            resistor("R1", "in", "out"),
            resistor("R2", "out", "0"),
        ];
        let a = CircuitIndex::new(&comps);
        let b = CircuitIndex::new(&comps);

        assert_eq!(
            a.nodes().collect::<Vec<_>>(),
            b.nodes().collect::<Vec<_>>()
        );
        assert_eq!(a.branch("V1"), b.branch("V1"));
    }
}
