//! End-to-end tests: netlist text through the analysis engine.

use approx::assert_relative_eq;
use fasor_parser::parse;
use fasor_solver::{analyze, Connection};

#[test]
fn test_divider_from_netlist() {
    let components = parse(
        "* resistive divider\n\
         V1 in 0 AC 100 0\n\
         R1 in out 40\n\
         R2 out 0 60\n\
         .end\n",
    )
    .expect("netlist should parse");

    let result = analyze(&components, 60.0).expect("analysis should succeed");

    assert_relative_eq!(result.node_voltages["out"].re, 60.0, epsilon = 1e-9);
    assert_relative_eq!(result.currents["R1"].re, 1.0, epsilon = 1e-9);
    assert_relative_eq!(result.powers["R2"].active(), 60.0, epsilon = 1e-6);
}

#[test]
fn test_rlc_from_netlist() {
    // Series R with a capacitor sized for X_C = 10 ohms at 60 Hz.
    let c_farads = 1.0 / (2.0 * std::f64::consts::PI * 60.0 * 10.0);
    let netlist = format!(
        "V1 in 0 AC 100 0\n\
         R1 in out 10\n\
         C1 out 0 {c_farads}\n"
    );
    let components = parse(&netlist).unwrap();
    let result = analyze(&components, 60.0).unwrap();

    // Z = 10 - 10j, |I| = 100/sqrt(200), 45 degrees leading.
    let i = result.currents["R1"];
    assert_relative_eq!(i.norm(), 100.0 / 200.0_f64.sqrt(), epsilon = 1e-9);
    assert_relative_eq!(i.arg().to_degrees(), 45.0, epsilon = 1e-9);

    let z = result.equivalent_impedance.unwrap();
    assert_relative_eq!(z.re, 10.0, epsilon = 1e-9);
    assert_relative_eq!(z.im, -10.0, epsilon = 1e-9);
}

#[test]
fn test_dependent_source_from_netlist() {
    let components = parse(
        "V1 c 0 AC 5 0\n\
         RC c 0 1k\n\
         E1 out 0 c 0 2\n\
         RL out 0 100\n",
    )
    .unwrap();
    let result = analyze(&components, 60.0).unwrap();

    assert_relative_eq!(result.node_voltages["out"].re, 10.0, epsilon = 1e-9);
}

#[test]
fn test_current_controlled_source_from_netlist() {
    // I(R1) = 2 A controls H1 with transresistance 3: V(b) = 6 V.
    let components = parse(
        "V1 a 0 AC 10 0\n\
         R1 a 0 5\n\
         H1 b 0 R1 3\n\
         RL b 0 2\n",
    )
    .unwrap();
    let result = analyze(&components, 60.0).unwrap();

    assert_relative_eq!(result.currents["R1"].re, 2.0, epsilon = 1e-9);
    assert_relative_eq!(result.node_voltages["b"].re, 6.0, epsilon = 1e-9);
}

#[test]
fn test_star_motor_from_netlist() {
    // Balanced supply driving a 3 kVA unity-pf star motor:
    // |Z|/phase = 220^2/1000 = 48.4 ohms, I/phase = 220/48.4 A.
    let components = parse(
        "VA a 0 AC 220 0\n\
         VB b 0 AC 220 -120\n\
         VC c 0 AC 220 120\n\
         MOTOR_Y M1 a b c n 3000 1.0\n",
    )
    .unwrap();
    let result = analyze(&components, 60.0).unwrap();

    assert_eq!(result.three_phase.len(), 1);
    let motor = &result.three_phase[0];
    assert_eq!(motor.connection, Connection::Star);
    assert_relative_eq!(motor.phase_voltage, 220.0, epsilon = 1e-6);
    assert_relative_eq!(motor.phase_current, 220.0 / 48.4, epsilon = 1e-6);
    // The motor absorbs its full rating.
    assert_relative_eq!(motor.total_power.active(), 3000.0, epsilon = 1e-6);
    assert_relative_eq!(motor.total_power.power_factor(), 1.0, epsilon = 1e-9);
}

#[test]
fn test_delta_motor_from_netlist() {
    let components = parse(
        "VA a 0 AC 220 0\n\
         VB b 0 AC 220 -120\n\
         VC c 0 AC 220 120\n\
         MOTOR_D M2 a b c 3000 0.85\n",
    )
    .unwrap();
    let result = analyze(&components, 60.0).unwrap();

    assert_eq!(result.three_phase.len(), 1);
    let motor = &result.three_phase[0];
    assert_eq!(motor.connection, Connection::Delta);
    assert_relative_eq!(motor.line_voltage, motor.phase_voltage, epsilon = 1e-12);
    assert_relative_eq!(
        motor.line_current,
        3.0_f64.sqrt() * motor.phase_current,
        epsilon = 1e-9
    );
    // Lagging at the rated power factor.
    assert!(!motor.total_power.is_leading());
    assert_relative_eq!(motor.total_power.power_factor(), 0.85, epsilon = 1e-9);
}
