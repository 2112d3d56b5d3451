//! Macro substitution for chat prompt templates.
//!
//! Expands `{{macroName}}`-style placeholders embedded in prompt
//! templates, chat messages, and UI strings into runtime values:
//! character names, message history, timestamps, dice rolls, seeded
//! random picks, and user-registered plugin values.
//!
//! The engine is a deterministic, fully synchronous rewrite pipeline
//! with a fixed pass ordering. Randomness comes in two disciplines:
//! `{{random}}` draws session entropy, while `{{pick}}` derives its
//! seed from the chat identity, the template text, and the match
//! position, making it reproducible across reloads.
//!
//! # Example
//!
//! ```
//! use macrosub::{ChatMetadata, EvalContext, MacroEngine, macro_env};
//!
//! let mut engine = MacroEngine::new();
//! engine.registry_mut().register("genre", "fantasy").unwrap();
//!
//! let mut env = macro_env! { "user" => "Alice", "char" => "Stella" };
//! let mut metadata = ChatMetadata::default();
//! let mut ctx = EvalContext::new(&[], &mut metadata, "chat-1");
//!
//! let text = engine.evaluate("{{char}} tells {{user}} a {{genre}} story.", &mut env, &mut ctx);
//! assert_eq!(text, "Stella tells Alice a fantasy story.");
//! ```

pub mod dice;
pub mod engine;
pub mod hash;
pub mod types;

pub use dice::{DiceRoller, NotationDice, RollResult};
pub use engine::{
    EvalContext, MacroEngine, MacroPass, MacroRegistry, RegistryError, humanize_duration,
};
pub use types::{Backend, ChatMessage, ChatMetadata, MacroEnv, MacroValue, RawValue, sanitize_value};

/// Creates a [`MacroEnv`] from key-value pairs.
///
/// Values are converted via `Into<MacroValue>`, so you can pass string
/// slices, owned strings, or [`MacroValue`]s directly.
///
/// # Example
///
/// ```
/// use macrosub::{MacroValue, macro_env};
///
/// let env = macro_env! {
///     "user" => "Alice",
///     "group" => MacroValue::dynamic(|_| "The Party".to_string()),
/// };
/// assert_eq!(env.len(), 2);
/// assert!(env.contains("user"));
/// ```
#[macro_export]
macro_rules! macro_env {
    {} => {
        $crate::MacroEnv::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut env = $crate::MacroEnv::new();
            $(
                env.set($key, $value);
            )+
            env
        }
    };
}
