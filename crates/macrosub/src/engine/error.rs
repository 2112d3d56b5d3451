//! Error types for registry operations.

use thiserror::Error;

/// A malformed macro name on register/unregister.
///
/// These are the only fatal errors the engine surfaces; every failure
/// inside an evaluation degrades to empty or placeholder text instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Macro name was empty or whitespace-only.
    #[error("macro name must be a non-empty string")]
    EmptyKey,

    /// Macro name contained the placeholder braces.
    #[error("macro name '{name}' must not contain '{{{{' or '}}}}'")]
    KeyContainsBraces { name: String },
}
