mod calculator;
mod cli;
mod config;
mod input;
mod logging;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::calculator::{Calculator, RecordingSink};
use crate::cli::{Cli, Command};
use crate::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => run_tui(&config),
        Command::Run { keys, json } => run_headless(&config, &keys, json),
    }
}

fn run_tui(config: &Config) -> Result<()> {
    if let Some(path) = config.log_file() {
        logging::init_file(&config.logging.level, &path)?;
    }
    ui::App::new(config.calculator_options(), config.tick_interval()).run()
}

/// Final state printed by `zcalc run --json`.
#[derive(Debug, Serialize)]
struct RunReport<'a> {
    display: &'a str,
    history: &'a str,
    current_value: &'a str,
    previous_value: &'a str,
    operator: Option<&'static str>,
    error: bool,
}

fn run_headless(config: &Config, keys: &str, json: bool) -> Result<()> {
    logging::init_stderr(&config.logging.level)?;

    let steps = input::parse_script(keys).context("Invalid key script")?;
    let mut calculator = Calculator::new(RecordingSink::new(), config.calculator_options());
    input::run_script(&mut calculator, &steps);

    let state = calculator.state();
    let sink = calculator.sink();
    tracing::debug!(steps = steps.len(), calls = sink.calls.len(), "script finished");
    if json {
        let report = RunReport {
            display: &sink.display,
            history: &sink.history,
            current_value: &state.current_value,
            previous_value: state.previous_value(),
            operator: state.pending_operator().map(|op| op.symbol()),
            error: calculator.is_error(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if !sink.history.is_empty() {
            println!("{}", sink.history);
        }
        println!("{}", sink.display);
    }

    Ok(())
}
