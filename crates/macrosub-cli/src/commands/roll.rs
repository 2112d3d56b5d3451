//! The `roll` subcommand: validate and evaluate a dice formula.

use clap::Args;
use macrosub::{DiceRoller, NotationDice};

/// Arguments for `macrosub roll`.
#[derive(Debug, Args)]
pub struct RollArgs {
    /// Dice formula, e.g. "2d6+1"
    pub formula: String,

    /// Only check whether the formula is valid
    #[arg(long)]
    pub check: bool,
}

/// Run the roll command, printing the total.
pub fn run_roll(args: RollArgs) -> i32 {
    let dice = NotationDice;
    if !dice.validate(&args.formula) {
        eprintln!("error: invalid dice formula '{}'", args.formula);
        return exitcode::DATAERR;
    }
    if args.check {
        println!("ok");
        return exitcode::OK;
    }
    match dice.roll(&args.formula) {
        Some(result) => {
            println!("{}", result.total);
            exitcode::OK
        }
        None => {
            eprintln!("error: could not evaluate '{}'", args.formula);
            exitcode::DATAERR
        }
    }
}
