//! Per-evaluation context describing the active chat and UI state.

use crate::hash::string_hash;
use crate::types::{Backend, ChatMessage, ChatMetadata};

/// Everything the pipeline reads about the world outside the template.
///
/// Built fresh by the caller for each evaluation; the engine holds no
/// ambient chat state. The transcript is read-only; the metadata is
/// mutable only to cache the chat-id hash.
///
/// # Example
///
/// ```
/// use macrosub::{Backend, ChatMetadata, EvalContext};
///
/// let mut metadata = ChatMetadata::default();
/// let ctx = EvalContext::new(&[], &mut metadata, "chat-1")
///     .with_input("draft text")
///     .with_max_context(4096)
///     .with_backend(Backend::TextGenWebui);
/// ```
pub struct EvalContext<'a> {
    /// The chat transcript, oldest message first.
    pub(crate) chat: &'a [ChatMessage],
    /// Persisted chat metadata (chat-id hash cache, main-chat id).
    pub(crate) metadata: &'a mut ChatMetadata,
    /// Current chat identifier.
    pub(crate) chat_id: &'a str,
    /// Current pending input text, substituted for the input macro.
    pub(crate) input: &'a str,
    /// Current maximum context size.
    pub(crate) max_context: usize,
    /// Active generation backend.
    pub(crate) backend: Backend,
    /// Index of the first message included in the generation context.
    pub(crate) first_included_message_id: Option<usize>,
    /// Side channel the banned-words pass feeds captured words into.
    pub(crate) banned_words: Option<&'a mut dyn FnMut(String)>,
}

impl<'a> EvalContext<'a> {
    /// Create a context for `chat_id` over the given transcript.
    pub fn new(
        chat: &'a [ChatMessage],
        metadata: &'a mut ChatMetadata,
        chat_id: &'a str,
    ) -> Self {
        Self {
            chat,
            metadata,
            chat_id,
            input: "",
            max_context: 0,
            backend: Backend::default(),
            first_included_message_id: None,
            banned_words: None,
        }
    }

    /// Set the pending input text.
    pub fn with_input(mut self, input: &'a str) -> Self {
        self.input = input;
        self
    }

    /// Set the maximum context size.
    pub fn with_max_context(mut self, max_context: usize) -> Self {
        self.max_context = max_context;
        self
    }

    /// Set the active generation backend.
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Set the index of the first message included in the context.
    pub fn with_first_included_message_id(mut self, id: usize) -> Self {
        self.first_included_message_id = Some(id);
        self
    }

    /// Install the side channel invoked for each captured banned word.
    ///
    /// The sink is only called while the active backend supports inline
    /// ban lists; the directive text is stripped either way.
    pub fn with_banned_words_sink(mut self, sink: &'a mut dyn FnMut(String)) -> Self {
        self.banned_words = Some(sink);
        self
    }

    /// Hash of the chat's logical identifier.
    ///
    /// Uses the explicit main-chat id when the metadata carries one,
    /// else the current chat id. Cached in the metadata on first
    /// computation so deterministic picks stay stable across reloads.
    pub(crate) fn chat_id_hash(&mut self) -> u64 {
        if let Some(hash) = self.metadata.chat_id_hash {
            return hash;
        }
        let logical_id = self.metadata.main_chat.as_deref().unwrap_or(self.chat_id);
        let hash = string_hash(logical_id);
        self.metadata.chat_id_hash = Some(hash);
        hash
    }
}
