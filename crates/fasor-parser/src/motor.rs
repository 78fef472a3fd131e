//! Three-phase motor equivalent expansion.
//!
//! A motor line names its rated total power and power factor; the parser
//! expands it into three identical per-phase impedances so the engine
//! sees only ordinary components.

use num_complex::Complex;

use fasor_core::{Component, NodeId};

/// Assumed RMS per-phase voltage when deriving the equivalent impedance.
pub const DEFAULT_PHASE_VOLTAGE: f64 = 220.0;

/// Per-phase equivalent impedance of a motor rated at `total_power`
/// volt-amperes with the given power factor.
///
/// Each phase carries a third of the rating, so `|Z| = V²/(S/3)`; the
/// impedance angle is `acos(pf)` (inductive).
pub fn phase_impedance(total_power: f64, power_factor: f64, phase_voltage: f64) -> Complex<f64> {
    let s_phase = total_power / 3.0;
    let magnitude = phase_voltage * phase_voltage / s_phase;
    let theta = power_factor.acos();
    Complex::from_polar(magnitude, theta)
}

/// Expand a star-connected motor into `_A`, `_B`, `_C` phase impedances,
/// each from a supply phase to the neutral node.
pub fn expand_star(
    name: &str,
    phases: [&str; 3],
    neutral: &str,
    total_power: f64,
    power_factor: f64,
) -> Vec<Component> {
    let z = phase_impedance(total_power, power_factor, DEFAULT_PHASE_VOLTAGE);
    let suffixes = ["A", "B", "C"];
    phases
        .iter()
        .zip(suffixes)
        .map(|(phase, suffix)| Component::Impedance {
            name: format!("{name}_{suffix}"),
            node_pos: NodeId::new(*phase),
            node_neg: NodeId::new(neutral),
            impedance: z,
        })
        .collect()
}

/// Expand a delta-connected motor into `_AB`, `_BC`, `_CA` impedances
/// forming a ring across the three supply phases.
pub fn expand_delta(
    name: &str,
    phases: [&str; 3],
    total_power: f64,
    power_factor: f64,
) -> Vec<Component> {
    let z = phase_impedance(total_power, power_factor, DEFAULT_PHASE_VOLTAGE);
    let [a, b, c] = phases;
    let windings = [("AB", a, b), ("BC", b, c), ("CA", c, a)];
    windings
        .iter()
        .map(|(suffix, pos, neg)| Component::Impedance {
            name: format!("{name}_{suffix}"),
            node_pos: NodeId::new(*pos),
            node_neg: NodeId::new(*neg),
            impedance: z,
        })
        .collect()
}
