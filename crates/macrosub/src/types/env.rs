use std::collections::HashMap;

use super::MacroValue;

/// The per-evaluation environment object: macro name to value.
///
/// Assembled fresh for each evaluation call from caller-supplied context
/// entries, then merged with all registered global macros (which
/// overwrite same-named caller entries). Names are stored as given and
/// matched case-insensitively at substitution time.
///
/// # Example
///
/// ```
/// use macrosub::{MacroEnv, MacroValue};
///
/// let mut env = MacroEnv::new();
/// env.set("user", "Alice");
/// env.set("char", MacroValue::dynamic(|_| "Stella".to_string()));
/// assert_eq!(env.len(), 2);
/// assert!(env.contains("user"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MacroEnv {
    entries: HashMap<String, MacroValue>,
}

impl MacroEnv {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an entry, overwriting any existing value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<MacroValue>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Get an entry by exact name.
    pub fn get(&self, name: &str) -> Option<&MacroValue> {
        self.entries.get(name)
    }

    /// Whether an entry exists under this exact name.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the environment is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry names in sorted order, for deterministic substitution.
    pub fn sorted_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }
}
