//! Macro registry for user- and plugin-registered macros.

use std::collections::HashMap;

use tracing::warn;

use crate::engine::error::RegistryError;
use crate::types::{MacroEnv, MacroValue, RawValue, sanitize_value};

/// A registry of macros mutable from arbitrary call sites.
///
/// Entries live for the registry's lifetime unless explicitly
/// unregistered. The registry is owned by its [`MacroEngine`] rather
/// than living in a process-wide static, so tests and embedders control
/// its lifecycle; a multi-threaded embedder wraps the engine in a lock.
///
/// [`MacroEngine`]: crate::MacroEngine
#[derive(Debug, Default)]
pub struct MacroRegistry {
    macros: HashMap<String, MacroValue>,
}

impl MacroRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a macro under `name`.
    ///
    /// The name is trimmed; it must be non-empty and must not contain
    /// the placeholder braces. Re-registering an existing name
    /// overwrites it with a warning.
    pub fn register(
        &mut self,
        name: &str,
        value: impl Into<MacroValue>,
    ) -> Result<(), RegistryError> {
        let key = validate_key(name)?;
        if self.macros.contains_key(key) {
            warn!(name = key, "macro already registered, overwriting");
        }
        self.macros.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Register a macro from a dynamically-typed host value, coercing it
    /// to a string via the sanitizer.
    pub fn register_raw(&mut self, name: &str, value: RawValue) -> Result<(), RegistryError> {
        if !matches!(value, RawValue::Text(_)) {
            warn!(name, "non-string macro value, coercing via sanitizer");
        }
        self.register(name, MacroValue::Static(sanitize_value(value)))
    }

    /// Remove a macro. Removing an absent name warns and no-ops.
    pub fn unregister(&mut self, name: &str) -> Result<(), RegistryError> {
        let key = validate_key(name)?;
        if self.macros.remove(key).is_none() {
            warn!(name = key, "macro not registered, nothing to remove");
        }
        Ok(())
    }

    /// Get a registered macro by exact name.
    pub fn get(&self, name: &str) -> Option<&MacroValue> {
        self.macros.get(name)
    }

    /// Number of registered macros.
    pub fn len(&self) -> usize {
        self.macros.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    /// Merge every registered macro into `env`, unconditionally
    /// overwriting same-named entries. Registered macros win over
    /// call-site context when names collide.
    pub fn populate_env(&self, env: &mut MacroEnv) {
        if self.macros.is_empty() {
            return;
        }
        let mut names: Vec<&String> = self.macros.keys().collect();
        names.sort();
        for name in names {
            env.set(name.clone(), self.macros[name].clone());
        }
    }
}

/// Validate a macro name, returning its trimmed form.
fn validate_key(name: &str) -> Result<&str, RegistryError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RegistryError::EmptyKey);
    }
    if trimmed.contains("{{") || trimmed.contains("}}") {
        return Err(RegistryError::KeyContainsBraces {
            name: trimmed.to_string(),
        });
    }
    Ok(trimmed)
}
