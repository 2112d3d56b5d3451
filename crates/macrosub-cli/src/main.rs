//! macrosub CLI entry point.
//!
//! Provides command-line tools for working with macro templates:
//! - `macrosub eval` - Expand macros in a template string
//! - `macrosub roll` - Validate and evaluate a dice formula

mod commands;

use std::process::exit;

use clap::{Parser, Subcommand};
use commands::{run_eval, run_roll, EvalArgs, RollArgs};

/// Macro substitution tools.
#[derive(Debug, Parser)]
#[command(name = "macrosub")]
#[command(about = "Macro substitution tools for chat prompt templates", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Expand macros in a template string
    Eval(EvalArgs),
    /// Validate and evaluate a dice formula
    Roll(RollArgs),
}

fn main() {
    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Eval(args) => run_eval(args),
        Commands::Roll(args) => run_roll(args),
    };
    exit(code);
}
