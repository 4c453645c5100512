use std::env;
use std::path::PathBuf;

use crate::calc::self_consumption::SelfUseModel;

/// Parsed command-line options.
#[derive(Debug)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub model: Option<SelfUseModel>,
    /// Raw `field=value` edits, applied in order.
    pub edits: Vec<String>,
    pub csv_out: Option<PathBuf>,
    pub json: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    if args.len() == 1 && (args[0] == "--help" || args[0] == "-h") {
        print_usage();
        std::process::exit(0);
    }
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut scenario = None;
    let mut preset = None;
    let mut model = None;
    let mut edits = Vec::new();
    let mut csv_out = None;
    let mut json = false;

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --scenario (expected a TOML file path)")?;
                if scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--model" => {
                i += 1;
                let name = args.next_or_err(
                    i,
                    "missing value for --model (expected `day_night` or `flat`)",
                )?;
                let parsed = SelfUseModel::from_name(name).ok_or_else(|| {
                    format!(
                        "invalid value for --model: `{name}` (expected one of {})",
                        SelfUseModel::NAMES.join(", ")
                    )
                })?;
                if model.replace(parsed).is_some() {
                    return Err("--model provided more than once".to_string());
                }
            }
            "--set" => {
                i += 1;
                let edit = args.next_or_err(i, "missing value for --set (expected `field=value`)")?;
                edits.push(edit.to_string());
            }
            "--csv-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --csv-out (expected a file path)")?;
                if csv_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--csv-out provided more than once".to_string());
                }
            }
            "--json" => json = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if scenario.is_some() && preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if scenario.is_none() && preset.is_none() {
        preset = Some("baseline".to_string());
    }

    Ok(CliOptions {
        scenario,
        preset,
        model,
        edits,
        csv_out,
        json,
    })
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("pv-payback — annual PV yield and payback estimator");
    eprintln!();
    eprintln!("Usage:");
    eprintln!(
        "  pv-payback [--scenario <path> | --preset <name>] [--model day_night|flat] \
         [--set <field>=<value>]... [--csv-out <path>] [--json]"
    );
    eprintln!();
    eprintln!("Fields: roof<N>_kwp, roof<N>_orientation, roof<N>_tilt, region,");
    eprintln!("        self_use_percent, day_night_split, electricity_price, feed_in_tariff,");
    eprintln!("        storage_capacity, system_cost, storage_cost");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}
