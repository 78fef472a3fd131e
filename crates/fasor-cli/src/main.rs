//! Fasor command-line interface.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use num_complex::Complex;

use fasor_solver::{analyze, AcAnalysis, Connection};

#[derive(Parser)]
#[command(name = "fasor")]
#[command(about = "A single-frequency AC circuit analyzer", long_about = None)]
#[command(version)]
struct Cli {
    /// Input netlist file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Analysis frequency in hertz
    #[arg(short, long, default_value_t = 60.0)]
    frequency: f64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref input) = cli.input {
        run_analysis(input, &cli)?;
    } else {
        println!("Fasor - AC Circuit Analyzer");
        println!();
        println!("Usage: fasor <netlist> [options]");
        println!();
        println!("Options:");
        println!("  -f, --frequency <HZ>  Analysis frequency (default: 60)");
        println!("  -v, --verbose         Verbose output");
        println!("  -h, --help            Show help");
        println!("  -V, --version         Show version");
    }

    Ok(())
}

fn run_analysis(input: &PathBuf, cli: &Cli) -> Result<()> {
    let source = fs::read_to_string(input)
        .with_context(|| format!("failed to read netlist file: {}", input.display()))?;

    let components = fasor_parser::parse(&source)
        .with_context(|| format!("failed to parse netlist: {}", input.display()))?;

    if cli.verbose {
        println!("Components: {}", components.len());
        println!("Frequency: {} Hz", cli.frequency);
        println!();
    }

    let result = analyze(&components, cli.frequency).context("analysis failed")?;
    print_analysis(&result);
    Ok(())
}

fn polar(value: Complex<f64>) -> String {
    format!("{:.4} ∠ {:.2}°", value.norm(), value.arg().to_degrees())
}

fn print_analysis(result: &AcAnalysis) {
    println!("AC analysis at {} Hz", result.frequency_hz);
    println!();

    println!("Node voltages:");
    for (node, v) in &result.node_voltages {
        println!(
            "  V({:<8}) = {:>20}  ({:.4} {:+.4}j)",
            node,
            polar(*v),
            v.re,
            v.im
        );
    }
    println!();

    println!("Component currents:");
    for (name, i) in &result.currents {
        println!("  I({:<8}) = {:>20}", name, polar(*i));
    }
    println!();

    println!("Component powers:");
    println!(
        "  {:<10}{:>12}{:>12}{:>12}{:>8}",
        "Name", "P (W)", "Q (VAR)", "|S| (VA)", "pf"
    );
    for (name, power) in &result.powers {
        let tag = if power.reactive().abs() < fasor_solver::EPSILON {
            ""
        } else if power.is_leading() {
            " (leading)"
        } else {
            " (lagging)"
        };
        println!(
            "  {:<10}{:>12.4}{:>12.4}{:>12.4}{:>8.4}{}",
            name,
            power.active(),
            power.reactive(),
            power.s.norm(),
            power.power_factor(),
            tag
        );
    }

    if !result.three_phase.is_empty() {
        println!();
        println!("Three-phase motors:");
        for motor in &result.three_phase {
            let connection = match motor.connection {
                Connection::Star => "star",
                Connection::Delta => "delta",
            };
            println!("  {} ({})", motor.name, connection);
            println!(
                "    V phase/line = {:.4} / {:.4} V",
                motor.phase_voltage, motor.line_voltage
            );
            println!(
                "    I phase/line = {:.4} / {:.4} A",
                motor.phase_current, motor.line_current
            );
            println!(
                "    P = {:.4} W, Q = {:.4} VAR, pf = {:.4}",
                motor.total_power.active(),
                motor.total_power.reactive(),
                motor.total_power.power_factor()
            );
        }
    }

    println!();
    match (result.equivalent_impedance, result.total_current) {
        (Some(z), Some(i)) => {
            println!("Equivalent impedance: {:.4} {:+.4}j Ω", z.re, z.im);
            println!("Total current: {}", polar(i));
        }
        (None, Some(i)) => {
            println!("Equivalent impedance: open circuit");
            println!("Total current: {}", polar(i));
        }
        _ => {}
    }
}
