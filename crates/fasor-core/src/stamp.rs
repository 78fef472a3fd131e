//! Per-component MNA stamp rules.

use num_complex::Complex;

use crate::component::Component;
use crate::error::{Error, Result};
use crate::index::CircuitIndex;
use crate::mna::Contribution;

/// Admittance of a passive element at angular frequency `omega`.
///
/// Returns `None` for variants that are not stamped as a two-terminal
/// admittance. Values that would produce an infinite admittance (zero
/// resistance, zero inductance, zero impedance) are rejected; a zero
/// capacitance yields zero admittance, an open circuit.
pub fn passive_admittance(component: &Component, omega: f64) -> Result<Option<Complex<f64>>> {
    let y = match component {
        Component::Resistor {
            name, resistance, ..
        } => {
            if *resistance == 0.0 {
                return Err(Error::ZeroImpedance {
                    name: name.clone(),
                    kind: "resistor",
                });
            }
            Complex::new(1.0 / resistance, 0.0)
        }
        Component::Inductor {
            name, inductance, ..
        } => {
            if *inductance == 0.0 {
                return Err(Error::ZeroImpedance {
                    name: name.clone(),
                    kind: "inductor",
                });
            }
            // 1/(jωL) = -j/(ωL)
            Complex::new(0.0, -1.0 / (omega * inductance))
        }
        Component::Capacitor { capacitance, .. } => Complex::new(0.0, omega * capacitance),
        Component::Impedance {
            name, impedance, ..
        } => {
            if impedance.norm() == 0.0 {
                return Err(Error::ZeroImpedance {
                    name: name.clone(),
                    kind: "impedance",
                });
            }
            impedance.inv()
        }
        _ => return Ok(None),
    };
    Ok(Some(y))
}

/// Phasor value of an independent voltage source.
pub fn source_phasor(magnitude: f64, phase_deg: f64) -> Complex<f64> {
    Complex::from_polar(magnitude, phase_deg.to_radians())
}

/// Compute a component's stamp contribution at angular frequency `omega`.
///
/// Pure function of the component, the index assignment, and the
/// frequency; the caller merges contributions into the system in any
/// order.
pub fn contribution(
    component: &Component,
    index: &CircuitIndex,
    omega: f64,
) -> Result<Contribution> {
    let mut c = Contribution::new();
    let (pos, neg) = component.terminals();
    let i = index.node(pos);
    let j = index.node(neg);

    match component {
        Component::Resistor { .. }
        | Component::Inductor { .. }
        | Component::Capacitor { .. }
        | Component::Impedance { .. } => {
            let y = passive_admittance(component, omega)?
                .expect("passive element has an admittance");
            c.admittance(i, j, y);
        }
        Component::VoltageSource {
            name,
            magnitude,
            phase_deg,
            ..
        } => {
            let row = index
                .branch_row(name)
                .expect("voltage-defining element is indexed");
            c.branch_coupling(i, j, row);
            c.add_rhs(row, source_phasor(*magnitude, *phase_deg));
        }
        Component::CurrentProbe { name, .. } => {
            // A 0 V source: constrains V(pos) = V(neg) and exposes the
            // branch current as an unknown.
            let row = index
                .branch_row(name)
                .expect("voltage-defining element is indexed");
            c.branch_coupling(i, j, row);
        }
        Component::Vcvs {
            name,
            ctrl_pos,
            ctrl_neg,
            gain,
            ..
        } => {
            let row = index
                .branch_row(name)
                .expect("voltage-defining element is indexed");
            c.branch_coupling(i, j, row);
            // Branch equation: V(pos) - V(neg) - gain*(V(c+) - V(c-)) = 0.
            let g = Complex::new(*gain, 0.0);
            if let Some(cp) = index.node(ctrl_pos) {
                c.add(row, cp, -g);
            }
            if let Some(cn) = index.node(ctrl_neg) {
                c.add(row, cn, g);
            }
        }
        Component::Vccs {
            ctrl_pos,
            ctrl_neg,
            gain,
            ..
        } => {
            // SPICE G convention: gain*(V(c+) - V(c-)) flows from pos
            // through the source to neg, so it leaves the pos node.
            let g = Complex::new(*gain, 0.0);
            let cp = index.node(ctrl_pos);
            let cn = index.node(ctrl_neg);
            if let Some(i) = i {
                if let Some(cp) = cp {
                    c.add(i, cp, g);
                }
                if let Some(cn) = cn {
                    c.add(i, cn, -g);
                }
            }
            if let Some(j) = j {
                if let Some(cp) = cp {
                    c.add(j, cp, -g);
                }
                if let Some(cn) = cn {
                    c.add(j, cn, g);
                }
            }
        }
        Component::Cccs { control, gain, .. } => {
            let ctrl_row = index
                .control_branch_row(control)
                .ok_or_else(|| Error::UnknownControlSource(control.clone()))?;
            let g = Complex::new(*gain, 0.0);
            if let Some(i) = i {
                c.add(i, ctrl_row, g);
            }
            if let Some(j) = j {
                c.add(j, ctrl_row, -g);
            }
        }
        Component::Ccvs {
            name,
            control,
            gain,
            ..
        } => {
            let row = index
                .branch_row(name)
                .expect("voltage-defining element is indexed");
            let ctrl_row = index
                .control_branch_row(control)
                .ok_or_else(|| Error::UnknownControlSource(control.clone()))?;
            c.branch_coupling(i, j, row);
            // Branch equation: V(pos) - V(neg) - gain*I(control) = 0.
            c.add(row, ctrl_row, Complex::new(-gain, 0.0));
        }
    }

    Ok(c)
}
