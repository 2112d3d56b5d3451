use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value as JsonValue;
use tracing::warn;

/// A macro value: either a literal string or a generator function.
///
/// `Dynamic` values receive the per-evaluation nonce and must return
/// their string synchronously. They are invoked once per matching
/// occurrence, so a repeated pattern queries the generator repeatedly
/// within one pass while the nonce stays constant.
///
/// # Example
///
/// ```
/// use macrosub::MacroValue;
///
/// let fixed = MacroValue::from("Alice");
/// assert_eq!(fixed.resolve(""), "Alice");
///
/// let counter = MacroValue::dynamic(|nonce| format!("pass {nonce}"));
/// assert_eq!(counter.resolve("a1"), "pass a1");
/// ```
#[derive(Clone)]
pub enum MacroValue {
    /// A literal replacement string.
    Static(String),
    /// A generator invoked with the evaluation nonce.
    Dynamic(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl MacroValue {
    /// Wrap a generator function as a `Dynamic` value.
    pub fn dynamic(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        MacroValue::Dynamic(Arc::new(f))
    }

    /// Produce the replacement string, invoking the generator if dynamic.
    pub fn resolve(&self, nonce: &str) -> String {
        match self {
            MacroValue::Static(text) => text.clone(),
            MacroValue::Dynamic(f) => f(nonce),
        }
    }
}

impl Debug for MacroValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MacroValue::Static(text) => f.debug_tuple("Static").field(text).finish(),
            MacroValue::Dynamic(_) => f.debug_tuple("Dynamic").field(&"<fn>").finish(),
        }
    }
}

impl From<String> for MacroValue {
    fn from(text: String) -> Self {
        MacroValue::Static(text)
    }
}

impl From<&str> for MacroValue {
    fn from(text: &str) -> Self {
        MacroValue::Static(text.to_string())
    }
}

impl From<&String> for MacroValue {
    fn from(text: &String) -> Self {
        MacroValue::Static(text.clone())
    }
}

/// A dynamically-typed value handed to the registry by the host.
///
/// Mirrors the value shapes an embedding client can produce; the
/// sanitizer collapses them all to a display string.
#[derive(Debug, Clone)]
pub enum RawValue {
    /// Absent value.
    Null,
    /// A plain string; passes through untouched.
    Text(String),
    /// A timestamp; rendered as ISO-8601.
    Date(DateTime<Utc>),
    /// Structured data; rendered as JSON text.
    Json(JsonValue),
    /// A bare function. Functions must be invoked by the caller, never
    /// sanitized directly.
    Callable,
    /// An unresolved asynchronous value. Unsupported: the pipeline is
    /// fully synchronous.
    Pending,
}

/// Convert an arbitrary host value to a display string.
///
/// Unsupported shapes (functions, pending asynchronous values) degrade
/// to the empty string with a warning instead of failing the operation.
///
/// # Example
///
/// ```
/// use macrosub::{RawValue, sanitize_value};
///
/// assert_eq!(sanitize_value(RawValue::Null), "");
/// assert_eq!(sanitize_value(RawValue::Text("hi".into())), "hi");
/// assert_eq!(
///     sanitize_value(RawValue::Json(serde_json::json!({"a": 1}))),
///     r#"{"a":1}"#
/// );
/// ```
pub fn sanitize_value(value: RawValue) -> String {
    match value {
        RawValue::Text(text) => text,
        RawValue::Null => String::new(),
        RawValue::Pending => {
            warn!("macro value is an unresolved asynchronous value, substituting empty string");
            String::new()
        }
        RawValue::Callable => {
            warn!("macro value is a bare function, substituting empty string");
            String::new()
        }
        RawValue::Date(date) => date.to_rfc3339_opts(SecondsFormat::Millis, true),
        RawValue::Json(JsonValue::String(text)) => text,
        RawValue::Json(json) => json.to_string(),
    }
}
