//! Circuit component sum type.

use num_complex::Complex;

use crate::node::NodeId;

/// A circuit element, immutable once constructed.
///
/// The component set is closed: stamping rules pattern-match on the
/// variant and each variant carries exactly the fields its stamp needs.
/// Dependent sources reference either a control node pair (voltage
/// controlled) or another element by name (current controlled).
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    /// Resistance in ohms.
    Resistor {
        name: String,
        node_pos: NodeId,
        node_neg: NodeId,
        resistance: f64,
    },
    /// Inductance in henries.
    Inductor {
        name: String,
        node_pos: NodeId,
        node_neg: NodeId,
        inductance: f64,
    },
    /// Capacitance in farads.
    Capacitor {
        name: String,
        node_pos: NodeId,
        node_neg: NodeId,
        capacitance: f64,
    },
    /// Complex impedance literal in ohms.
    Impedance {
        name: String,
        node_pos: NodeId,
        node_neg: NodeId,
        impedance: Complex<f64>,
    },
    /// Independent AC voltage source, phasor `magnitude ∠ phase_deg`.
    VoltageSource {
        name: String,
        node_pos: NodeId,
        node_neg: NodeId,
        magnitude: f64,
        phase_deg: f64,
    },
    /// Voltage-controlled voltage source:
    /// `V(node_pos, node_neg) = gain * V(ctrl_pos, ctrl_neg)`.
    Vcvs {
        name: String,
        node_pos: NodeId,
        node_neg: NodeId,
        ctrl_pos: NodeId,
        ctrl_neg: NodeId,
        gain: f64,
    },
    /// Voltage-controlled current source:
    /// `gain * V(ctrl_pos, ctrl_neg)` flows from `node_pos` through the
    /// source to `node_neg`.
    Vccs {
        name: String,
        node_pos: NodeId,
        node_neg: NodeId,
        ctrl_pos: NodeId,
        ctrl_neg: NodeId,
        gain: f64,
    },
    /// Current-controlled current source; `control` names the element
    /// whose branch current is the controlling quantity.
    Cccs {
        name: String,
        node_pos: NodeId,
        node_neg: NodeId,
        control: String,
        gain: f64,
    },
    /// Current-controlled voltage source; `control` as for [`Component::Cccs`].
    Ccvs {
        name: String,
        node_pos: NodeId,
        node_neg: NodeId,
        control: String,
        gain: f64,
    },
    /// Internal zero-volt source synthesized by the engine to observe the
    /// current of a control element that is not itself voltage-defining.
    /// Never created by parsers; excluded from user-facing results.
    CurrentProbe {
        name: String,
        node_pos: NodeId,
        node_neg: NodeId,
    },
}

impl Component {
    /// Get the element's name.
    pub fn name(&self) -> &str {
        match self {
            Component::Resistor { name, .. }
            | Component::Inductor { name, .. }
            | Component::Capacitor { name, .. }
            | Component::Impedance { name, .. }
            | Component::VoltageSource { name, .. }
            | Component::Vcvs { name, .. }
            | Component::Vccs { name, .. }
            | Component::Cccs { name, .. }
            | Component::Ccvs { name, .. }
            | Component::CurrentProbe { name, .. } => name,
        }
    }

    /// Get the output terminal pair `(node_pos, node_neg)`.
    pub fn terminals(&self) -> (&NodeId, &NodeId) {
        match self {
            Component::Resistor {
                node_pos, node_neg, ..
            }
            | Component::Inductor {
                node_pos, node_neg, ..
            }
            | Component::Capacitor {
                node_pos, node_neg, ..
            }
            | Component::Impedance {
                node_pos, node_neg, ..
            }
            | Component::VoltageSource {
                node_pos, node_neg, ..
            }
            | Component::Vcvs {
                node_pos, node_neg, ..
            }
            | Component::Vccs {
                node_pos, node_neg, ..
            }
            | Component::Cccs {
                node_pos, node_neg, ..
            }
            | Component::Ccvs {
                node_pos, node_neg, ..
            }
            | Component::CurrentProbe {
                node_pos, node_neg, ..
            } => (node_pos, node_neg),
        }
    }

    /// All nodes this element references, control terminals included.
    pub fn nodes(&self) -> Vec<&NodeId> {
        match self {
            Component::Vcvs {
                node_pos,
                node_neg,
                ctrl_pos,
                ctrl_neg,
                ..
            }
            | Component::Vccs {
                node_pos,
                node_neg,
                ctrl_pos,
                ctrl_neg,
                ..
            } => vec![node_pos, node_neg, ctrl_pos, ctrl_neg],
            _ => {
                let (p, n) = self.terminals();
                vec![p, n]
            }
        }
    }

    /// Whether this element introduces a branch-current unknown.
    pub fn is_voltage_defining(&self) -> bool {
        matches!(
            self,
            Component::VoltageSource { .. }
                | Component::Vcvs { .. }
                | Component::Ccvs { .. }
                | Component::CurrentProbe { .. }
        )
    }

    /// Whether this element is engine-internal and hidden from results.
    pub fn is_internal(&self) -> bool {
        matches!(self, Component::CurrentProbe { .. })
    }

    /// Name of the control element for current-controlled sources.
    pub fn control_name(&self) -> Option<&str> {
        match self {
            Component::Cccs { control, .. } | Component::Ccvs { control, .. } => Some(control),
            _ => None,
        }
    }
}

/// Name of the probe synthesized to sense the current of `control`.
///
/// The `:` separator cannot appear in netlist element names, so probe
/// names never collide with user elements.
pub fn probe_name(control: &str) -> String {
    format!("{control}:probe")
}

/// Name of the internal node spliced in series with `control`.
pub fn sense_node_name(control: &str) -> String {
    format!("{control}:sense")
}
