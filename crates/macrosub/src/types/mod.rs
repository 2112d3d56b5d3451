//! Data types shared across the engine: macro values, the per-evaluation
//! environment, and the chat collaborator records.

mod chat;
mod env;
mod value;

pub use chat::{Backend, ChatMessage, ChatMetadata};
pub use env::MacroEnv;
pub use value::{MacroValue, RawValue, sanitize_value};
