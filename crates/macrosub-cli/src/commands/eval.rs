//! The `eval` subcommand: expand macros in a template string.

use clap::Args;
use macrosub::{ChatMetadata, EvalContext, MacroEngine, MacroEnv};

/// Arguments for `macrosub eval`.
#[derive(Debug, Args)]
pub struct EvalArgs {
    /// Template text to expand
    pub template: String,

    /// Environment entries as NAME=VALUE pairs
    #[arg(short, long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<String>,

    /// Chat identifier used to seed deterministic picks
    #[arg(long, default_value = "cli")]
    pub chat_id: String,

    /// Pending input text substituted for {{input}}
    #[arg(long, default_value = "")]
    pub input: String,
}

/// Run the eval command, printing the expanded template.
pub fn run_eval(args: EvalArgs) -> i32 {
    let mut env = MacroEnv::new();
    for pair in &args.set {
        match pair.split_once('=') {
            Some((name, value)) => env.set(name, value),
            None => {
                eprintln!("error: '{pair}' is not a NAME=VALUE pair");
                return exitcode::USAGE;
            }
        }
    }

    let engine = MacroEngine::new();
    let mut metadata = ChatMetadata::default();
    let mut ctx = EvalContext::new(&[], &mut metadata, &args.chat_id).with_input(&args.input);
    println!("{}", engine.evaluate(&args.template, &mut env, &mut ctx));
    exitcode::OK
}
