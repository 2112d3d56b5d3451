use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One message record in a chat transcript.
///
/// The engine only reads these; it never mutates the transcript.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Display name of the author.
    #[serde(default)]
    pub name: String,

    /// Whether the message was sent by the user.
    #[serde(default)]
    pub is_user: bool,

    /// Whether this is a system/narrator message. System messages are
    /// skipped by every message-scanning macro.
    #[serde(default)]
    pub is_system: bool,

    /// Message text.
    #[serde(default)]
    pub text: String,

    /// When the message was sent.
    #[serde(default)]
    pub send_date: Option<DateTime<Utc>>,

    /// Alternative generations for this message.
    #[serde(default)]
    pub swipes: Vec<String>,

    /// Index of the currently selected swipe, if any.
    #[serde(default)]
    pub swipe_id: Option<usize>,
}

/// Persisted per-chat metadata the engine reads and writes.
///
/// The cached chat-id hash keeps deterministic picks stable across
/// reloads even when the underlying chat id string is not recomputed
/// identically every time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMetadata {
    /// Cached hash of the chat's logical identifier, set on first use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id_hash: Option<u64>,

    /// Explicit "main chat" identifier; takes precedence over the
    /// current chat id when computing the hash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_chat: Option<String>,
}

/// The active generation backend, as reported by the host UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// No backend selected or an unrecognized one.
    #[default]
    Unknown,
    /// text-generation-webui.
    TextGenWebui,
    /// KoboldAI.
    KoboldAi,
    /// NovelAI.
    NovelAi,
    /// OpenAI-compatible chat completion.
    OpenAi,
}

impl Backend {
    /// Whether this backend consumes inline `{{banned "..."}}` lists.
    pub fn supports_inline_bans(self) -> bool {
        matches!(self, Backend::TextGenWebui)
    }
}
