//! Line-oriented netlist parsing.

use fasor_core::units::parse_value;
use fasor_core::{Component, NodeId};

use crate::error::{Error, Result};
use crate::motor;

/// Parse a netlist into a component list.
///
/// One element per line; blank lines and `*` comments are skipped, and
/// `.`-directives (such as `.end`) are ignored. Elements dispatch on the
/// first letter of their name; `MOTOR_Y`/`MOTOR_D` lines expand into
/// three phase impedances. Control references of `F`/`H` elements must
/// name an element defined somewhere in the netlist.
pub fn parse(input: &str) -> Result<Vec<Component>> {
    let mut parsed: Vec<(usize, Component)> = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('*') || trimmed.starts_with('.') {
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let keyword = tokens[0].to_ascii_uppercase();

        let expanded: Vec<Component> = match keyword.as_str() {
            "MOTOR_Y" => parse_motor_star(line, &tokens)?,
            "MOTOR_D" => parse_motor_delta(line, &tokens)?,
            _ => {
                let comp = match keyword.chars().next() {
                    Some('V') => parse_voltage_source(line, &tokens)?,
                    Some('R') => parse_passive(line, &tokens, |name, p, n, v| {
                        Component::Resistor {
                            name,
                            node_pos: p,
                            node_neg: n,
                            resistance: v,
                        }
                    })?,
                    Some('L') => parse_passive(line, &tokens, |name, p, n, v| {
                        Component::Inductor {
                            name,
                            node_pos: p,
                            node_neg: n,
                            inductance: v,
                        }
                    })?,
                    Some('C') => parse_passive(line, &tokens, |name, p, n, v| {
                        Component::Capacitor {
                            name,
                            node_pos: p,
                            node_neg: n,
                            capacitance: v,
                        }
                    })?,
                    Some('Z') => parse_impedance(line, &tokens)?,
                    Some('E') => parse_voltage_controlled(line, &tokens, true)?,
                    Some('G') => parse_voltage_controlled(line, &tokens, false)?,
                    Some('F') => parse_current_controlled(line, &tokens, false)?,
                    Some('H') => parse_current_controlled(line, &tokens, true)?,
                    _ => {
                        return Err(Error::UnknownElement {
                            line,
                            name: tokens[0].to_string(),
                        })
                    }
                };
                vec![comp]
            }
        };

        for comp in expanded {
            if parsed.iter().any(|(_, c)| c.name() == comp.name()) {
                return Err(Error::DuplicateElement {
                    line,
                    name: comp.name().to_string(),
                });
            }
            parsed.push((line, comp));
        }
    }

    validate_controls(&parsed)?;
    Ok(parsed.into_iter().map(|(_, c)| c).collect())
}

fn validate_controls(parsed: &[(usize, Component)]) -> Result<()> {
    for (line, comp) in parsed {
        if let Some(control) = comp.control_name() {
            if !parsed.iter().any(|(_, c)| c.name() == control) {
                return Err(Error::UnknownControl {
                    line: *line,
                    control: control.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn expect_arity(line: usize, tokens: &[&str], allowed: &[usize], form: &str) -> Result<()> {
    if allowed.contains(&tokens.len()) {
        Ok(())
    } else {
        Err(Error::ParseError {
            line,
            message: format!("expected `{form}`, got {} fields", tokens.len()),
        })
    }
}

fn number(line: usize, token: &str) -> Result<f64> {
    parse_value(token).ok_or_else(|| Error::InvalidValue {
        line,
        value: token.to_string(),
    })
}

/// `V<name> n+ n- AC <mag> [phase_deg]`
fn parse_voltage_source(line: usize, tokens: &[&str]) -> Result<Component> {
    expect_arity(line, tokens, &[5, 6], "V<name> n+ n- AC <mag> [phase_deg]")?;
    if !tokens[3].eq_ignore_ascii_case("AC") {
        return Err(Error::ParseError {
            line,
            message: format!("expected `AC` keyword, got `{}`", tokens[3]),
        });
    }
    let magnitude = number(line, tokens[4])?;
    let phase_deg = match tokens.get(5) {
        Some(t) => number(line, t)?,
        None => 0.0,
    };
    Ok(Component::VoltageSource {
        name: tokens[0].to_string(),
        node_pos: NodeId::new(tokens[1]),
        node_neg: NodeId::new(tokens[2]),
        magnitude,
        phase_deg,
    })
}

/// `R|L|C<name> n1 n2 <value>` with SI suffixes.
fn parse_passive(
    line: usize,
    tokens: &[&str],
    build: impl FnOnce(String, NodeId, NodeId, f64) -> Component,
) -> Result<Component> {
    expect_arity(line, tokens, &[4], "<name> n1 n2 <value>")?;
    let value = number(line, tokens[3])?;
    Ok(build(
        tokens[0].to_string(),
        NodeId::new(tokens[1]),
        NodeId::new(tokens[2]),
        value,
    ))
}

/// `Z<name> n1 n2 <re> <im>`
fn parse_impedance(line: usize, tokens: &[&str]) -> Result<Component> {
    expect_arity(line, tokens, &[5], "Z<name> n1 n2 <re> <im>")?;
    let re = number(line, tokens[3])?;
    let im = number(line, tokens[4])?;
    Ok(Component::Impedance {
        name: tokens[0].to_string(),
        node_pos: NodeId::new(tokens[1]),
        node_neg: NodeId::new(tokens[2]),
        impedance: num_complex::Complex::new(re, im),
    })
}

/// `E<name> out+ out- c+ c- <gain>` (VCVS) or the same shape for `G`
/// (VCCS).
fn parse_voltage_controlled(line: usize, tokens: &[&str], voltage_out: bool) -> Result<Component> {
    expect_arity(line, tokens, &[6], "<name> out+ out- c+ c- <gain>")?;
    let name = tokens[0].to_string();
    let node_pos = NodeId::new(tokens[1]);
    let node_neg = NodeId::new(tokens[2]);
    let ctrl_pos = NodeId::new(tokens[3]);
    let ctrl_neg = NodeId::new(tokens[4]);
    let gain = number(line, tokens[5])?;
    Ok(if voltage_out {
        Component::Vcvs {
            name,
            node_pos,
            node_neg,
            ctrl_pos,
            ctrl_neg,
            gain,
        }
    } else {
        Component::Vccs {
            name,
            node_pos,
            node_neg,
            ctrl_pos,
            ctrl_neg,
            gain,
        }
    })
}

/// `F<name> out+ out- <element> <gain>` (CCCS) or the same shape for `H`
/// (CCVS).
fn parse_current_controlled(line: usize, tokens: &[&str], voltage_out: bool) -> Result<Component> {
    expect_arity(line, tokens, &[5], "<name> out+ out- <element> <gain>")?;
    let name = tokens[0].to_string();
    let node_pos = NodeId::new(tokens[1]);
    let node_neg = NodeId::new(tokens[2]);
    let control = tokens[3].to_string();
    let gain = number(line, tokens[4])?;
    Ok(if voltage_out {
        Component::Ccvs {
            name,
            node_pos,
            node_neg,
            control,
            gain,
        }
    } else {
        Component::Cccs {
            name,
            node_pos,
            node_neg,
            control,
            gain,
        }
    })
}

fn motor_rating(line: usize, power_tok: &str, pf_tok: &str) -> Result<(f64, f64)> {
    let power = number(line, power_tok)?;
    let pf = number(line, pf_tok)?;
    if power <= 0.0 {
        return Err(Error::InvalidValue {
            line,
            value: power_tok.to_string(),
        });
    }
    if !(0.0..=1.0).contains(&pf) || pf == 0.0 {
        return Err(Error::InvalidValue {
            line,
            value: pf_tok.to_string(),
        });
    }
    Ok((power, pf))
}

/// `MOTOR_Y <name> a b c n <P> <pf>`
fn parse_motor_star(line: usize, tokens: &[&str]) -> Result<Vec<Component>> {
    expect_arity(line, tokens, &[8], "MOTOR_Y <name> a b c n <P> <pf>")?;
    let (power, pf) = motor_rating(line, tokens[6], tokens[7])?;
    Ok(motor::expand_star(
        tokens[1],
        [tokens[2], tokens[3], tokens[4]],
        tokens[5],
        power,
        pf,
    ))
}

/// `MOTOR_D <name> a b c <P> <pf>`
fn parse_motor_delta(line: usize, tokens: &[&str]) -> Result<Vec<Component>> {
    expect_arity(line, tokens, &[7], "MOTOR_D <name> a b c <P> <pf>")?;
    let (power, pf) = motor_rating(line, tokens[5], tokens[6])?;
    Ok(motor::expand_delta(
        tokens[1],
        [tokens[2], tokens[3], tokens[4]],
        power,
        pf,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_basic_netlist() {
        let comps = parse(
            "* simple divider\n\
             V1 in 0 AC 100 0\n\
             R1 in mid 1k\n\
             R2 mid 0 2k\n\
             .end\n",
        )
        .unwrap();

        assert_eq!(comps.len(), 3);
        assert_eq!(comps[0].name(), "V1");
        match &comps[1] {
            Component::Resistor { resistance, .. } => {
                assert_relative_eq!(*resistance, 1000.0)
            }
            other => panic!("expected resistor, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_voltage_source_phase_optional() {
        let comps = parse("V1 a 0 AC 10\nR1 a 0 1\n").unwrap();
        match &comps[0] {
            Component::VoltageSource {
                magnitude,
                phase_deg,
                ..
            } => {
                assert_relative_eq!(*magnitude, 10.0);
                assert_relative_eq!(*phase_deg, 0.0);
            }
            other => panic!("expected source, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_missing_ac_keyword() {
        let err = parse("V1 a 0 100 0\n").unwrap_err();
        assert!(matches!(err, Error::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_parse_impedance_literal() {
        let comps = parse("Z1 a 0 3 -4\n").unwrap();
        match &comps[0] {
            Component::Impedance { impedance, .. } => {
                assert_relative_eq!(impedance.re, 3.0);
                assert_relative_eq!(impedance.im, -4.0);
            }
            other => panic!("expected impedance, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_dependent_sources() {
        let comps = parse(
            "V1 a 0 AC 1\n\
             R1 a 0 10\n\
             E1 b 0 a 0 2\n\
             G1 c 0 a 0 0.5\n\
             F1 d 0 V1 3\n\
             H1 e 0 R1 4\n",
        )
        .unwrap();

        assert!(matches!(comps[2], Component::Vcvs { .. }));
        assert!(matches!(comps[3], Component::Vccs { .. }));
        assert!(matches!(comps[4], Component::Cccs { .. }));
        assert!(matches!(comps[5], Component::Ccvs { .. }));
    }

    #[test]
    fn test_unknown_control_rejected() {
        let err = parse("V1 a 0 AC 1\nF1 b 0 R9 2\n").unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownControl { line: 2, control } if control == "R9"
        ));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = parse("R1 a 0 1\nR1 b 0 2\n").unwrap_err();
        assert!(matches!(err, Error::DuplicateElement { line: 2, .. }));
    }

    #[test]
    fn test_unknown_element_rejected() {
        let err = parse("Q1 a b c 1\n").unwrap_err();
        assert!(matches!(err, Error::UnknownElement { line: 1, .. }));
    }

    #[test]
    fn test_si_suffixes() {
        let comps = parse("C1 a 0 100n\nL1 a 0 10M\nR1 a 0 4.7MEG\n").unwrap();
        match &comps[0] {
            Component::Capacitor { capacitance, .. } => {
                assert_relative_eq!(*capacitance, 100e-9)
            }
            other => panic!("expected capacitor, got {other:?}"),
        }
        match &comps[1] {
            Component::Inductor { inductance, .. } => {
                assert_relative_eq!(*inductance, 10e-3)
            }
            other => panic!("expected inductor, got {other:?}"),
        }
        match &comps[2] {
            Component::Resistor { resistance, .. } => {
                assert_relative_eq!(*resistance, 4.7e6)
            }
            other => panic!("expected resistor, got {other:?}"),
        }
    }

    #[test]
    fn test_motor_star_expansion() {
        let comps = parse("V1 a 0 AC 220\nMOTOR_Y M1 a b c n 3000 0.9\n").unwrap();
        assert_eq!(comps.len(), 4);
        let names: Vec<&str> = comps[1..].iter().map(|c| c.name()).collect();
        assert_eq!(names, ["M1_A", "M1_B", "M1_C"]);
    }

    #[test]
    fn test_motor_delta_expansion() {
        let comps = parse("MOTOR_D M2 a b c 3000 0.85\n").unwrap();
        assert_eq!(comps.len(), 3);
        assert_eq!(comps[0].name(), "M2_AB");
    }

    #[test]
    fn test_motor_bad_power_factor() {
        let err = parse("MOTOR_Y M1 a b c n 3000 1.5\n").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { line: 1, .. }));
    }
}
