//! Subcommand implementations.

mod eval;
mod roll;

pub use eval::{run_eval, EvalArgs};
pub use roll::{run_roll, RollArgs};
