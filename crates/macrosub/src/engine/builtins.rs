//! Built-in replacer passes: legacy angle-bracket tags, message-history
//! macros, string reversal, comment stripping, and banned-word removal.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use unicode_segmentation::UnicodeSegmentation;

use crate::engine::context::EvalContext;
use crate::types::{ChatMessage, MacroEnv};

static LEGACY_USER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<USER>").expect("valid regex")
});
static LEGACY_BOT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<BOT>").expect("valid regex")
});
static LEGACY_CHAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<CHAR>").expect("valid regex")
});
static LEGACY_CHARIFNOTGROUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<CHARIFNOTGROUP>").expect("valid regex")
});
static LEGACY_GROUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<GROUP>").expect("valid regex")
});

static MAX_PROMPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{maxPrompt\}\}").expect("valid regex")
});
static LAST_MESSAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{lastMessage\}\}").expect("valid regex")
});
static LAST_MESSAGE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{lastMessageId\}\}").expect("valid regex")
});
static LAST_USER_MESSAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{lastUserMessage\}\}").expect("valid regex")
});
static LAST_CHAR_MESSAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{lastCharMessage\}\}").expect("valid regex")
});
static FIRST_INCLUDED_MESSAGE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{firstIncludedMessageId\}\}").expect("valid regex")
});
static LAST_SWIPE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{lastSwipeId\}\}").expect("valid regex")
});
static CURRENT_SWIPE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{currentSwipeId\}\}").expect("valid regex")
});
static REVERSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{reverse:(.+?)\}\}").expect("valid regex")
});

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{//.*?\}\}").expect("valid regex")
});
static BANNED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\{\{banned "(.*?)"\}\}"#).expect("valid regex")
});

/// Substitute the legacy angle-bracket tags, case-insensitively.
///
/// `<USER>` resolves via the `user` environment entry, `<BOT>`/`<CHAR>`
/// via `char`, and `<CHARIFNOTGROUP>`/`<GROUP>` via `group`. Dynamic
/// entries are invoked once per occurrence, with an empty nonce since
/// this pass runs before the evaluation nonce exists. Tags without a
/// matching entry are left untouched.
pub(crate) fn replace_legacy_tags(
    content: &str,
    env: &MacroEnv,
    escape: &dyn Fn(&str) -> String,
) -> String {
    let tags: [(&Regex, &str); 5] = [
        (&LEGACY_USER_RE, "user"),
        (&LEGACY_BOT_RE, "char"),
        (&LEGACY_CHAR_RE, "char"),
        (&LEGACY_CHARIFNOTGROUP_RE, "group"),
        (&LEGACY_GROUP_RE, "group"),
    ];

    let mut content = content.to_string();
    for (re, key) in tags {
        let Some(value) = env.get(key) else { continue };
        content = re
            .replace_all(&content, |_: &Captures| escape(&value.resolve("")))
            .into_owned();
    }
    content
}

/// Substitute the read-only message-history macros and the reversal macro.
pub(crate) fn replace_message_macros(
    content: &str,
    ctx: &EvalContext<'_>,
    escape: &dyn Fn(&str) -> String,
) -> String {
    let chat = ctx.chat;

    let mut content = MAX_PROMPT_RE
        .replace_all(content, |_: &Captures| escape(&ctx.max_context.to_string()))
        .into_owned();
    content = LAST_MESSAGE_RE
        .replace_all(&content, |_: &Captures| escape(&last_message(chat)))
        .into_owned();
    content = LAST_MESSAGE_ID_RE
        .replace_all(&content, |_: &Captures| {
            escape(&index_text(last_message_id(chat)))
        })
        .into_owned();
    content = LAST_USER_MESSAGE_RE
        .replace_all(&content, |_: &Captures| escape(&last_user_message(chat)))
        .into_owned();
    content = LAST_CHAR_MESSAGE_RE
        .replace_all(&content, |_: &Captures| escape(&last_char_message(chat)))
        .into_owned();
    content = FIRST_INCLUDED_MESSAGE_ID_RE
        .replace_all(&content, |_: &Captures| {
            escape(&index_text(ctx.first_included_message_id))
        })
        .into_owned();
    content = LAST_SWIPE_ID_RE
        .replace_all(&content, |_: &Captures| {
            escape(&index_text(last_swipe_count(chat)))
        })
        .into_owned();
    content = CURRENT_SWIPE_ID_RE
        .replace_all(&content, |_: &Captures| {
            escape(&index_text(current_swipe_id(chat)))
        })
        .into_owned();
    content = REVERSE_RE
        .replace_all(&content, |caps: &Captures| {
            let reversed: String = caps[1].graphemes(true).rev().collect();
            escape(&reversed)
        })
        .into_owned();
    content
}

/// Strip `{{// ...}}` comment spans, across multiple lines, unescaped.
pub(crate) fn strip_comments(content: &str) -> String {
    COMMENT_RE.replace_all(content, "").into_owned()
}

/// Remove `{{banned "word"}}` directives, feeding each captured word
/// into the context's sink when the active backend supports inline ban
/// lists. Produces no visible text and applies no escaping.
pub(crate) fn strip_banned_words(content: &str, ctx: &mut EvalContext<'_>) -> String {
    let supports_bans = ctx.backend.supports_inline_bans();
    BANNED_RE
        .replace_all(content, |caps: &Captures| {
            if supports_bans {
                if let Some(sink) = ctx.banned_words.as_mut() {
                    sink(caps[1].to_string());
                }
            }
            String::new()
        })
        .into_owned()
}

/// Text of the most recent non-system message, or empty.
fn last_message(chat: &[ChatMessage]) -> String {
    chat.iter()
        .rev()
        .find(|m| !m.is_system)
        .map(|m| m.text.clone())
        .unwrap_or_default()
}

/// Text of the most recent user message, or empty.
fn last_user_message(chat: &[ChatMessage]) -> String {
    chat.iter()
        .rev()
        .find(|m| m.is_user && !m.is_system)
        .map(|m| m.text.clone())
        .unwrap_or_default()
}

/// Text of the most recent character message, or empty.
fn last_char_message(chat: &[ChatMessage]) -> String {
    chat.iter()
        .rev()
        .find(|m| !m.is_user && !m.is_system)
        .map(|m| m.text.clone())
        .unwrap_or_default()
}

/// Index of the last message, or `None` for an empty chat.
fn last_message_id(chat: &[ChatMessage]) -> Option<usize> {
    chat.len().checked_sub(1)
}

/// Swipe count of the last message, or `None` when it has no swipes.
fn last_swipe_count(chat: &[ChatMessage]) -> Option<usize> {
    chat.last().map(|m| m.swipes.len()).filter(|n| *n > 0)
}

/// One-based index of the last message's selected swipe.
fn current_swipe_id(chat: &[ChatMessage]) -> Option<usize> {
    chat.last().and_then(|m| m.swipe_id).map(|id| id + 1)
}

/// Render an optional index, with absence as empty text.
fn index_text(index: Option<usize>) -> String {
    index.map(|i| i.to_string()).unwrap_or_default()
}
