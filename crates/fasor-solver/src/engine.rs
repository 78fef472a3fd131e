//! Single-frequency AC analysis driver.
//!
//! Ties the pipeline together: validate the frequency, synthesize current
//! probes for current-controlled sources, assemble the MNA system, solve
//! it, and derive the reported quantities.

use indexmap::IndexMap;
use num_complex::Complex;

use fasor_core::stamp::{contribution, passive_admittance, source_phasor};
use fasor_core::{probe_name, sense_node_name, AcSystem, CircuitIndex, Component, NodeId};

use crate::error::Result;
use crate::linear::solve_complex;
use crate::results::{three_phase_summaries, AcAnalysis, Power, EPSILON};

/// Analyze a circuit at a single frequency in hertz.
///
/// The component list is taken as-is; element ordering only affects the
/// iteration order of the result maps, not the solution itself. Returns
/// an error for a non-positive or non-finite frequency, a degenerate
/// element value, an unresolvable control reference, or a singular
/// system.
pub fn analyze(components: &[Component], frequency_hz: f64) -> Result<AcAnalysis> {
    if !frequency_hz.is_finite() || frequency_hz <= 0.0 {
        return Err(fasor_core::Error::InvalidFrequency(frequency_hz).into());
    }
    let omega = 2.0 * std::f64::consts::PI * frequency_hz;

    let working = expose_control_currents(components)?;
    let index = CircuitIndex::new(&working);

    let mut system = AcSystem::new(index.num_nodes(), index.num_branches());
    for comp in &working {
        system.apply(&contribution(comp, &index, omega)?);
    }

    let x = solve_complex(system.matrix(), system.rhs())?;

    let mut node_voltages = IndexMap::new();
    node_voltages.insert(NodeId::ground().to_string(), Complex::new(0.0, 0.0));
    for (name, i) in index.nodes() {
        node_voltages.insert(name.to_string(), x[i]);
    }

    let node_voltage = |node: &NodeId| -> Complex<f64> {
        match index.node(node) {
            Some(i) => x[i],
            None => Complex::new(0.0, 0.0),
        }
    };

    let mut component_voltages = IndexMap::new();
    let mut currents = IndexMap::new();
    let mut powers = IndexMap::new();
    for comp in &working {
        if comp.is_internal() {
            continue;
        }
        let (pos, neg) = comp.terminals();
        let v = node_voltage(pos) - node_voltage(neg);
        let i = component_current(comp, &index, &x, v, omega)?;

        let name = comp.name().to_string();
        component_voltages.insert(name.clone(), v);
        currents.insert(name.clone(), i);
        powers.insert(name, Power { s: v * i.conj() });
    }

    // The first independent source characterizes the whole network: the
    // impedance it sees and the total current it delivers.
    let mut equivalent_impedance = None;
    let mut total_current = None;
    if let Some(source) = working
        .iter()
        .find(|c| matches!(c, Component::VoltageSource { .. }))
    {
        if let Component::VoltageSource {
            name,
            magnitude,
            phase_deg,
            ..
        } = source
        {
            let j = index
                .branch_row(name)
                .map(|row| x[row])
                .unwrap_or_else(|| Complex::new(0.0, 0.0));
            // The branch current flows pos -> neg inside the source, so
            // the current delivered to the network is its negation.
            let delivered = -j;
            total_current = Some(delivered);
            if delivered.norm() > EPSILON {
                equivalent_impedance =
                    Some(source_phasor(*magnitude, *phase_deg) / delivered);
            }
        }
    }

    let three_phase = three_phase_summaries(&working, &component_voltages, &currents);

    Ok(AcAnalysis {
        frequency_hz,
        node_voltages,
        component_voltages,
        currents,
        powers,
        equivalent_impedance,
        total_current,
        three_phase,
    })
}

/// Current through a component, flowing `node_pos` -> `node_neg`.
fn component_current(
    comp: &Component,
    index: &CircuitIndex,
    x: &nalgebra::DVector<Complex<f64>>,
    v: Complex<f64>,
    omega: f64,
) -> Result<Complex<f64>> {
    let i = match comp {
        Component::VoltageSource { name, .. }
        | Component::Vcvs { name, .. }
        | Component::Ccvs { name, .. }
        | Component::CurrentProbe { name, .. } => {
            let row = index
                .branch_row(name)
                .expect("voltage-defining element is indexed");
            x[row]
        }
        Component::Vccs {
            ctrl_pos,
            ctrl_neg,
            gain,
            ..
        } => {
            let vc = match index.node(ctrl_pos) {
                Some(i) => x[i],
                None => Complex::new(0.0, 0.0),
            } - match index.node(ctrl_neg) {
                Some(i) => x[i],
                None => Complex::new(0.0, 0.0),
            };
            vc * *gain
        }
        Component::Cccs { control, gain, .. } => {
            let row = index
                .control_branch_row(control)
                .ok_or_else(|| fasor_core::Error::UnknownControlSource(control.clone()))?;
            x[row] * *gain
        }
        _ => {
            let y = passive_admittance(comp, omega)?
                .expect("passive element has an admittance");
            v * y
        }
    };
    Ok(i)
}

/// Make every control element's current observable.
///
/// Current-controlled sources read the branch current of their control
/// element. When the control is voltage-defining its current is already
/// an unknown; otherwise a zero-volt probe is spliced in series at the
/// control's positive terminal, through an internal sense node. Probes
/// are appended after the user's components so they never perturb the
/// ordering of user-visible branch currents.
fn expose_control_currents(components: &[Component]) -> Result<Vec<Component>> {
    let mut controls: Vec<&str> = Vec::new();
    for comp in components {
        if let Some(control) = comp.control_name() {
            if !controls.contains(&control) {
                controls.push(control);
            }
        }
    }
    if controls.is_empty() {
        return Ok(components.to_vec());
    }

    let mut working = components.to_vec();
    let mut probes = Vec::new();
    for control in controls {
        let target = working
            .iter_mut()
            .find(|c| c.name() == control)
            .ok_or_else(|| fasor_core::Error::UnknownControlSource(control.to_string()))?;
        if target.is_voltage_defining() {
            continue;
        }

        let sense = NodeId::new(sense_node_name(control));
        let original_pos = target.terminals().0.clone();
        set_node_pos(target, sense.clone());
        probes.push(Component::CurrentProbe {
            name: probe_name(control),
            node_pos: original_pos,
            node_neg: sense,
        });
    }
    working.extend(probes);
    Ok(working)
}

fn set_node_pos(comp: &mut Component, node: NodeId) {
    match comp {
        Component::Resistor { node_pos, .. }
        | Component::Inductor { node_pos, .. }
        | Component::Capacitor { node_pos, .. }
        | Component::Impedance { node_pos, .. }
        | Component::VoltageSource { node_pos, .. }
        | Component::Vcvs { node_pos, .. }
        | Component::Vccs { node_pos, .. }
        | Component::Cccs { node_pos, .. }
        | Component::Ccvs { node_pos, .. }
        | Component::CurrentProbe { node_pos, .. } => *node_pos = node,
    }
}
