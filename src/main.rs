//! pv-payback entry point: CLI wiring, config loading and result output.

use std::path::Path;
use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use pv_payback::calc::Calculator;
use pv_payback::cli::parse_args;
use pv_payback::config::ScenarioConfig;
use pv_payback::input::{FieldEdit, InputState};
use pv_payback::io::export::export_csv;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Applies `field=value` edits in order; rejected edits are reported but never abort.
fn apply_edits(mut state: InputState, edits: &[String]) -> InputState {
    for raw in edits {
        let edit = match FieldEdit::parse_assignment(raw) {
            Ok(edit) => edit,
            Err(e) => {
                eprintln!("warning: ignoring --set {raw}: {e}");
                continue;
            }
        };
        state = match state.clone().apply(&edit) {
            Ok(next) => next,
            Err(e) => {
                eprintln!("warning: ignoring --set {raw}: {e}");
                state
            }
        };
    }
    for (field, err) in state.errors() {
        eprintln!("warning: {field}: {err}; using last valid value");
    }
    state
}

fn main() {
    init_tracing();

    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    // --scenario takes priority, then --preset (parse_args defaults to baseline)
    let config = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path)
    } else {
        ScenarioConfig::from_preset(cli.preset.as_deref().unwrap_or("baseline"))
    };
    let mut config = match config {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    if let Some(model) = cli.model {
        config.model = model;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let model = config.model;
    let state = apply_edits(config.into_input_state(), &cli.edits);
    let scenario = state.best_effort();
    info!(roofs = scenario.roofs.len(), region = %scenario.region, "computing");

    let result = Calculator::new(model).compute_scenario(&scenario);

    if cli.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize result: {e}");
                process::exit(1);
            }
        }
    } else {
        println!("{result}");
    }

    if let Some(ref path) = cli.csv_out {
        if let Err(e) = export_csv(&result, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Results written to {}", path.display());
    }
}
