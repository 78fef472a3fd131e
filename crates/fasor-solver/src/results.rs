//! Result types for a single-frequency AC analysis.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use num_complex::Complex;

use fasor_core::{Component, NodeId};

/// Threshold below which apparent power and currents are treated as zero
/// when deriving power factor and equivalent impedance.
pub const EPSILON: f64 = 1e-12;

/// Complex power absorbed by one component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Power {
    /// Apparent power `S = V·conj(I)` in volt-amperes.
    pub s: Complex<f64>,
}

impl Power {
    /// Active power in watts.
    pub fn active(&self) -> f64 {
        self.s.re
    }

    /// Reactive power in VAR.
    pub fn reactive(&self) -> f64 {
        self.s.im
    }

    /// Power factor `P/|S|`, defined as 1.0 for negligible `|S|`.
    pub fn power_factor(&self) -> f64 {
        let mag = self.s.norm();
        if mag < EPSILON {
            1.0
        } else {
            self.s.re / mag
        }
    }

    /// Negative reactive power means a leading (capacitive) load.
    pub fn is_leading(&self) -> bool {
        self.s.im < 0.0
    }
}

/// Winding topology of a three-phase group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    /// Star (Y): three phases share a neutral, 4 distinct nodes.
    Star,
    /// Delta (Δ): three phases form a ring, 3 distinct nodes.
    Delta,
}

/// Aggregate quantities for a three-phase motor equivalent.
///
/// Derived when exactly three impedance components share a `name_` motor
/// prefix. Voltage and current magnitudes are the mean over the three
/// phases; the √3 line/phase relation follows the topology.
#[derive(Debug, Clone)]
pub struct ThreePhaseSummary {
    pub name: String,
    pub connection: Connection,
    pub phase_voltage: f64,
    pub line_voltage: f64,
    pub phase_current: f64,
    pub line_current: f64,
    /// Sum of the three phase powers.
    pub total_power: Power,
}

/// Complete result set of one analysis invocation.
///
/// Produced fresh on every call; keys iterate in deterministic order
/// (nodes sorted, components in input order). Internal current probes
/// never appear in the component maps.
#[derive(Debug, Clone)]
pub struct AcAnalysis {
    /// Analysis frequency in hertz.
    pub frequency_hz: f64,
    /// Node name → phasor voltage, ground included at 0 V.
    ///
    /// Internal `<name>:sense` nodes spliced in for current-controlled
    /// sources appear here too; each sits at the same potential as the
    /// node it was split from, since only a zero-volt probe separates
    /// them.
    pub node_voltages: IndexMap<String, Complex<f64>>,
    /// Component name → terminal voltage `V(pos) − V(neg)`.
    pub component_voltages: IndexMap<String, Complex<f64>>,
    /// Component name → current flowing from `node_pos` through the
    /// component to `node_neg`.
    pub currents: IndexMap<String, Complex<f64>>,
    /// Component name → absorbed complex power.
    pub powers: IndexMap<String, Power>,
    /// Impedance seen by the first independent voltage source, `None`
    /// when it delivers no measurable current (open circuit).
    pub equivalent_impedance: Option<Complex<f64>>,
    /// Current delivered by the first independent voltage source.
    pub total_current: Option<Complex<f64>>,
    /// Aggregates for three-phase motor groups.
    pub three_phase: Vec<ThreePhaseSummary>,
}

impl AcAnalysis {
    /// Phasor voltage of a node; ground is 0.
    pub fn voltage(&self, node: &NodeId) -> Complex<f64> {
        if node.is_ground() {
            Complex::new(0.0, 0.0)
        } else {
            self.node_voltages
                .get(node.as_str())
                .copied()
                .unwrap_or_else(|| Complex::new(0.0, 0.0))
        }
    }

    /// Current through a named component.
    pub fn current(&self, name: &str) -> Option<Complex<f64>> {
        self.currents.get(name).copied()
    }

    /// Power absorbed by a named component.
    pub fn power(&self, name: &str) -> Option<&Power> {
        self.powers.get(name)
    }
}

/// Detect three-phase motor groups and derive their aggregates.
///
/// A group is exactly three `Impedance` components named
/// `<motor>_<suffix>`; four distinct terminal nodes mean a star
/// connection, three mean delta. Other arities are ignored.
pub(crate) fn three_phase_summaries(
    components: &[Component],
    component_voltages: &IndexMap<String, Complex<f64>>,
    currents: &IndexMap<String, Complex<f64>>,
) -> Vec<ThreePhaseSummary> {
    let mut groups: IndexMap<String, Vec<&Component>> = IndexMap::new();
    for comp in components {
        if let Component::Impedance { name, .. } = comp {
            if let Some((prefix, suffix)) = name.rsplit_once('_') {
                if !prefix.is_empty() && !suffix.is_empty() {
                    groups.entry(prefix.to_string()).or_default().push(comp);
                }
            }
        }
    }

    let mut summaries = Vec::new();
    for (motor, phases) in groups {
        if phases.len() != 3 {
            continue;
        }

        let nodes: BTreeSet<&str> = phases
            .iter()
            .flat_map(|c| {
                let (p, n) = c.terminals();
                [p.as_str(), n.as_str()]
            })
            .collect();
        let connection = match nodes.len() {
            4 => Connection::Star,
            3 => Connection::Delta,
            _ => continue,
        };

        let mut v_sum = 0.0;
        let mut i_sum = 0.0;
        let mut s_total = Complex::new(0.0, 0.0);
        for phase in &phases {
            let name = phase.name();
            let v = component_voltages
                .get(name)
                .copied()
                .unwrap_or_else(|| Complex::new(0.0, 0.0));
            let i = currents
                .get(name)
                .copied()
                .unwrap_or_else(|| Complex::new(0.0, 0.0));
            v_sum += v.norm();
            i_sum += i.norm();
            s_total += v * i.conj();
        }
        let phase_voltage = v_sum / 3.0;
        let phase_current = i_sum / 3.0;

        let sqrt3 = 3.0_f64.sqrt();
        let (line_voltage, line_current) = match connection {
            Connection::Star => (sqrt3 * phase_voltage, phase_current),
            Connection::Delta => (phase_voltage, sqrt3 * phase_current),
        };

        summaries.push(ThreePhaseSummary {
            name: motor,
            connection,
            phase_voltage,
            line_voltage,
            phase_current,
            line_current,
            total_power: Power { s: s_total },
        });
    }

    summaries
}
