//! The macro substitution engine.
//!
//! This module provides the registry of user/plugin macros, the
//! per-evaluation context, and the ordered rewrite pipeline that expands
//! `{{macro}}` placeholders in prompt and display text.

mod builtins;
mod context;
mod error;
mod pipeline;
mod random;
mod registry;
mod time;

pub use context::EvalContext;
pub use error::RegistryError;
pub use pipeline::{MacroEngine, MacroPass};
pub use registry::MacroRegistry;
pub use time::humanize_duration;
