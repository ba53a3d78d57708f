//! # Block Estimator CLI
//!
//! Terminal front-end for `block_core`. Takes the wall, block, opening and
//! cost figures as flags (or a JSON input file), runs the estimate and prints
//! the result sheet or its JSON form.

mod log;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use block_core::calculations::block_wall::MAX_WASTAGE_PERCENT;
use block_core::report::{build_report, render_text, INSTRUCTIONS};
use block_core::{load_partial_input, load_settings, EstimateInput, EstimatorSettings, PartialEstimateInput};

use crate::log::init_logging;

/// Estimate the number of blocks and their cost for a bungalow's walls.
#[derive(Debug, Parser)]
#[command(version, about, after_help = INSTRUCTIONS)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to optional settings file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print measuring instructions and exit
    #[arg(long)]
    instructions: bool,

    /// Read inputs from a JSON file; flags given alongside override its values
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Total wall perimeter in meters, partitions included
    #[arg(long, value_parser = non_negative)]
    perimeter: Option<f64>,

    /// Average wall height in meters
    #[arg(long, value_parser = non_negative)]
    height: Option<f64>,

    /// Block length in meters, mortar joint included [default: from settings]
    #[arg(long, value_parser = non_negative)]
    block_length: Option<f64>,

    /// Block height in meters, mortar joint included [default: from settings]
    #[arg(long, value_parser = non_negative)]
    block_height: Option<f64>,

    /// Number of doors [default: 0]
    #[arg(long)]
    doors: Option<u32>,

    /// Door width in meters [default: 0]
    #[arg(long, value_parser = non_negative)]
    door_width: Option<f64>,

    /// Door height in meters [default: 0]
    #[arg(long, value_parser = non_negative)]
    door_height: Option<f64>,

    /// Number of windows [default: 0]
    #[arg(long)]
    windows: Option<u32>,

    /// Window width in meters [default: 0]
    #[arg(long, value_parser = non_negative)]
    window_width: Option<f64>,

    /// Window height in meters [default: 0]
    #[arg(long, value_parser = non_negative)]
    window_height: Option<f64>,

    /// Wastage allowance in percent, 0-20; use 8-12 for curved walls [default: from settings]
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_WASTAGE_PERCENT)))]
    wastage: Option<u8>,

    /// Cost per block [default: 0]
    #[arg(long, value_parser = non_negative)]
    unit_cost: Option<f64>,
}

impl Cli {
    fn has_estimate_inputs(&self) -> bool {
        self.input.is_some() || self.perimeter.is_some() || self.height.is_some()
    }

    /// The values given as flags, unset where the flag was omitted.
    fn flag_values(&self) -> PartialEstimateInput {
        PartialEstimateInput {
            perimeter_m: self.perimeter,
            wall_height_m: self.height,
            block_length_m: self.block_length,
            block_height_m: self.block_height,
            door_count: self.doors,
            door_width_m: self.door_width,
            door_height_m: self.door_height,
            window_count: self.windows,
            window_width_m: self.window_width,
            window_height_m: self.window_height,
            wastage_percent: self.wastage,
            unit_cost: self.unit_cost,
        }
    }

    /// Assemble the estimator input: settings, then input file, then flags.
    fn to_input(&self, settings: &EstimatorSettings) -> Result<EstimateInput> {
        let file_values = match &self.input {
            Some(path) => load_partial_input(path)
                .with_context(|| format!("Failed to load input from {}", path.display()))?,
            None => PartialEstimateInput::default(),
        };
        let input = file_values.overlay(self.flag_values()).resolve(settings);
        input.check_form_constraints()?;
        Ok(input)
    }
}

/// How a run ended when nothing went wrong with files or settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// A report or the help/instructions text was printed
    Done,
    /// The estimator rejected the input
    Rejected,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Done => ExitCode::SUCCESS,
            Outcome::Rejected => ExitCode::FAILURE,
        }
    }
}

fn non_negative(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("'{s}' must be a number of at least 0"));
    }
    Ok(value)
}

fn load_config(path: Option<&Path>) -> Result<EstimatorSettings> {
    match path {
        Some(path) => {
            load_settings(path).with_context(|| format!("Failed to load settings from {}", path.display()))
        }
        None => Ok(EstimatorSettings::default()),
    }
}

fn run(cli: &Cli) -> Result<Outcome> {
    if cli.instructions {
        println!("{INSTRUCTIONS}");
        return Ok(Outcome::Done);
    }
    if !cli.has_estimate_inputs() {
        Cli::command().print_help()?;
        return Ok(Outcome::Done);
    }

    let settings = load_config(cli.config.as_deref())?;
    let input = cli.to_input(&settings)?;

    match build_report(&input, &settings) {
        Ok(report) => {
            if cli.json {
                println!("{}", report.to_json()?);
            } else {
                print!("{}", render_text(&report));
            }
            Ok(Outcome::Done)
        }
        Err(e) if e.is_validation() => {
            tracing::debug!(code = e.error_code(), "estimate rejected");
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&e)?);
            } else {
                eprintln!("{e}");
            }
            Ok(Outcome::Rejected)
        }
        Err(e) => Err(e.into()),
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(&cli) {
        Ok(outcome) => Ok(outcome.into()),
        Err(e) => {
            tracing::error!(error = %e, "estimator failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("block-estimator").chain(args.iter().copied())).unwrap()
    }

    fn write(dir: &TempDir, name: &str, contents: &str) -> String {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path.display().to_string()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_to_input() {
        let cli = parse(&[
            "--perimeter", "40", "--height", "3", "--doors", "1", "--door-width", "1",
            "--door-height", "2.1", "--windows", "2", "--window-width", "1.2",
            "--window-height", "1.2", "--unit-cost", "350",
        ]);
        let input = cli.to_input(&EstimatorSettings::default()).unwrap();

        assert_eq!(input.perimeter_m, 40.0);
        assert_eq!(input.block_length_m, 0.45);
        assert_eq!(input.block_height_m, 0.225);
        assert_eq!(input.wastage_percent, 5);

        let result = block_core::estimate(&input).unwrap();
        assert_eq!(result.final_block_count, 1193);
    }

    #[test]
    fn test_settings_supply_defaults() {
        let settings = EstimatorSettings {
            default_wastage_percent: 10,
            default_block_length_m: 0.4,
            ..EstimatorSettings::default()
        };
        let input = parse(&["--perimeter", "10", "--height", "3"]).to_input(&settings).unwrap();
        assert_eq!(input.wastage_percent, 10);
        assert_eq!(input.block_length_m, 0.4);
        assert_eq!(input.door_count, 0);

        let input = parse(&["--perimeter", "10", "--height", "3", "--wastage", "0"])
            .to_input(&settings)
            .unwrap();
        assert_eq!(input.wastage_percent, 0);
    }

    #[test]
    fn test_rejects_negative_and_out_of_range() {
        let args = |extra: &[&str]| {
            let mut v = vec!["block-estimator", "--perimeter", "10"];
            v.extend_from_slice(extra);
            Cli::try_parse_from(v)
        };
        assert!(args(&["--height", "-3"]).is_err());
        assert!(args(&["--wastage", "21"]).is_err());
        assert!(args(&["--unit-cost", "abc"]).is_err());
        assert!(args(&["--wastage", "20"]).is_ok());
    }

    #[test]
    fn test_input_file_takes_settings_defaults() {
        let dir = TempDir::new().unwrap();
        let input_path = write(&dir, "input.json", r#"{ "perimeter_m": 40.0, "wall_height_m": 3.0 }"#);
        let settings = EstimatorSettings {
            default_wastage_percent: 10,
            default_block_height_m: 0.2,
            ..EstimatorSettings::default()
        };

        let input = parse(&["--input", &input_path]).to_input(&settings).unwrap();
        assert_eq!(input.wastage_percent, 10);
        assert_eq!(input.block_length_m, 0.45);
        assert_eq!(input.block_height_m, 0.2);
    }

    #[test]
    fn test_flags_override_input_file() {
        let dir = TempDir::new().unwrap();
        let input_path = write(
            &dir,
            "input.json",
            r#"{ "perimeter_m": 40.0, "wall_height_m": 3.0, "unit_cost": 300.0, "wastage_percent": 8, "door_count": 1 }"#,
        );

        let cli = parse(&["--input", &input_path, "--unit-cost", "350", "--doors", "2", "--perimeter", "50"]);
        let input = cli.to_input(&EstimatorSettings::default()).unwrap();
        assert_eq!(input.unit_cost, 350.0);
        assert_eq!(input.door_count, 2);
        assert_eq!(input.perimeter_m, 50.0);
        assert_eq!(input.wall_height_m, 3.0);
        assert_eq!(input.wastage_percent, 8);
    }

    #[test]
    fn test_input_file_form_constraints() {
        let dir = TempDir::new().unwrap();
        let input_path = write(&dir, "input.json", r#"{ "perimeter_m": 40.0, "wall_height_m": 3.0, "wastage_percent": 50 }"#);
        assert!(parse(&["--input", &input_path]).to_input(&EstimatorSettings::default()).is_err());

        // A flag can bring the file back within range
        let cli = parse(&["--input", &input_path, "--wastage", "12"]);
        assert_eq!(cli.to_input(&EstimatorSettings::default()).unwrap().wastage_percent, 12);
    }

    #[test]
    fn test_zero_perimeter_reaches_estimator() {
        let cli = parse(&["--perimeter", "0", "--height", "3"]);
        assert!(cli.has_estimate_inputs());
        let input = cli.to_input(&EstimatorSettings::default()).unwrap();
        let err = block_core::estimate(&input).unwrap_err();
        assert_eq!(err.to_string(), "Perimeter and wall height must be greater than 0.");
    }

    #[test]
    fn test_run_rejects_zero_perimeter() {
        let outcome = run(&parse(&["--perimeter", "0", "--height", "3"])).unwrap();
        assert_eq!(outcome, Outcome::Rejected);

        let outcome = run(&parse(&["--perimeter", "40", "--height", "3", "--block-length", "0"])).unwrap();
        assert_eq!(outcome, Outcome::Rejected);

        let outcome = run(&parse(&["--perimeter", "0", "--height", "3", "--json"])).unwrap();
        assert_eq!(outcome, Outcome::Rejected);
    }

    #[test]
    fn test_run_prints_report() {
        let outcome = run(&parse(&["--perimeter", "40", "--height", "3", "--unit-cost", "350"])).unwrap();
        assert_eq!(outcome, Outcome::Done);
    }

    #[test]
    fn test_run_fails_on_missing_input_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json").display().to_string();
        assert!(run(&parse(&["--input", &missing])).is_err());
    }
}
