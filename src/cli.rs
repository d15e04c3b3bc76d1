use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "zcalc", version, about = "Arithmetic calculator for the terminal")]
pub struct Cli {
    /// Path to config.toml (overrides $ZCALC_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive calculator (default)
    Tui,
    /// Feed a key script to the calculator and print the result
    Run {
        /// Keys to press, e.g. "3+4*2=" or "12{Backspace}5{Enter}"
        keys: String,
        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
    },
}
