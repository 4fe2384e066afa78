//! # Torquebench CLI
//!
//! Runs the static transmission analysis and prints a summary, the JSON
//! report, and optionally the rope segment table as CSV.
//!
//! ```text
//! torque_cli [CONFIG.json] [--motor RATED PEAK] [--csv]
//! ```
//!
//! Without a config file the reference bench is analysed.

use std::path::Path;
use std::process::ExitCode;

use torque_core::calculations::motor::{check_motor, MotorCheck, MotorRating};
use torque_core::logging::{setup_logging_callback, MessageLevel};
use torque_core::report::{rope_table_csv, segment_label, TransmissionReport};
use torque_core::{calculate, load_config, CalcError, CalcResult, TransmissionConfig};

const USAGE: &str = "usage: torque_cli [CONFIG.json] [--motor RATED PEAK] [--csv]";

#[derive(Debug, Default)]
struct Options {
    config_path: Option<String>,
    motor: Option<MotorRating>,
    csv: bool,
}

fn log_to_stderr(level: MessageLevel, message: &str) {
    eprintln!("[{}] {}", level.tag(), message);
}

fn parse_number(flag: &str, value: Option<String>) -> Result<f64, String> {
    let value = value.ok_or_else(|| format!("{} needs a value", flag))?;
    value
        .parse()
        .map_err(|_| format!("{}: '{}' is not a number", flag, value))
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut options = Options::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--motor" => {
                let rated = parse_number("--motor", args.next())?;
                let peak = parse_number("--motor", args.next())?;
                options.motor = Some(MotorRating::new(rated, peak));
            }
            "--csv" => options.csv = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            flag if flag.starts_with("--") => {
                return Err(format!("unknown option {}\n{}", flag, USAGE));
            }
            path => {
                if options.config_path.replace(path.to_string()).is_some() {
                    return Err(format!("only one config file may be given\n{}", USAGE));
                }
            }
        }
    }
    Ok(options)
}

fn run(options: &Options) -> CalcResult<()> {
    let config = match &options.config_path {
        Some(path) => load_config(Path::new(path))?,
        None => TransmissionConfig::reference(),
    };

    let result = calculate(&config)?;
    let motor_check = options
        .motor
        .as_ref()
        .map(|rating| check_motor(&result, rating))
        .transpose()?;

    println!("═══════════════════════════════════════");
    println!("  ROPE TRANSMISSION ANALYSIS");
    println!("═══════════════════════════════════════");
    println!();
    let label = if config.label.is_empty() {
        "(unnamed)"
    } else {
        config.label.as_str()
    };
    println!("Input: {}", label);
    println!(
        "  Pendulum:  {} kg at {} m, {}° below horizontal",
        config.pendulum_mass_kg, config.arm_length_m, config.arm_angle_deg
    );
    let diameters: Vec<String> = config
        .diameters_m
        .iter()
        .map(|d| format!("{:.0}", d * 1000.0))
        .collect();
    println!("  Shafts:    {} mm", diameters.join(" / "));
    println!("  Gearbox:   {}:1", config.gear_ratio);
    println!();
    println!("Rope forces:");
    let shafts = config.diameters_m.len();
    for (i, force) in result.rope_forces_n.iter().enumerate() {
        println!("  F_{} = {:.3} N", segment_label(i, shafts), force);
    }
    println!();
    println!("Torques:");
    println!("  Pendulum load:  {:.4} N·m", result.load_torque_nm);
    println!("  After gearbox:  {:.4} N·m", result.pre_gearbox_torque_nm);
    println!("  Motor:          {:.4} N·m", result.motor_torque_nm);
    println!();
    println!("Verification:");
    println!("  Total reduction: {:.2}:1", result.total_reduction_ratio);
    println!("  Relative error:  {:.3e}", result.relative_error);
    println!(
        "  Mechanical advantage: {}",
        status_icon(result.has_mechanical_advantage())
    );
    if let Some(check) = &motor_check {
        print_motor_check(check);
    }

    let mut report = TransmissionReport::new(&config, &result);
    if let Some(check) = motor_check {
        report = report.with_motor_check(check);
    }
    println!();
    println!("JSON Output:");
    println!("{}", report.to_json()?);

    if options.csv {
        println!();
        print!("{}", rope_table_csv(&config, &result)?);
    }
    Ok(())
}

fn print_motor_check(check: &MotorCheck) {
    println!();
    println!("Motor:");
    println!("  Rated utilization: {:.2}", check.rated_utilization);
    println!("  Peak utilization:  {:.2}", check.peak_utilization);
    println!(
        "  Safety factor:     {:.2} [{}]",
        check.safety_factor,
        check.status()
    );
}

fn status_icon(pass: bool) -> &'static str {
    if pass {
        "[OK]"
    } else {
        "[FAIL]"
    }
}

fn report_error(e: &CalcError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn main() -> ExitCode {
    setup_logging_callback(log_to_stderr);

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(2);
        }
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}
