//! Entropy-seeded and content-seeded list picks.
//!
//! Both directives share one list syntax; they differ only in where the
//! pick's seed comes from. `{{random}}` draws fresh entropy per
//! occurrence, so outcomes change on every evaluation. `{{pick}}`
//! derives its seed from the chat identity, the full un-substituted
//! template text, and the match position, so the same template in the
//! same chat picks the same item across reloads and regenerations.

use std::mem;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::hash::{Seed, string_hash, uniform_index};

static RANDOM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{random\s?::?([^}]+)\}\}").expect("valid regex")
});
static PICK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{pick\s?::?([^}]+)\}\}").expect("valid regex")
});

/// Split a list argument into items.
///
/// A list containing the double-colon separator splits on it verbatim,
/// with no trimming. Otherwise the list splits on commas not preceded
/// by a backslash; each item is trimmed and escaped commas are restored.
pub(crate) fn split_list(raw: &str) -> Vec<String> {
    if raw.contains("::") {
        return raw.split("::").map(ToString::to_string).collect();
    }

    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&',') => {
                chars.next();
                current.push(',');
            }
            ',' => items.push(mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    items.push(current);
    items.into_iter().map(|s| s.trim().to_string()).collect()
}

/// Substitute `{{random}}` directives with an entropy-drawn list item.
///
/// Every occurrence draws independently; outcomes are not reproducible
/// across evaluations or reloads.
pub(crate) fn random_replace(
    content: &str,
    empty_list_placeholder: &str,
    escape: &dyn Fn(&str) -> String,
) -> String {
    RANDOM_RE
        .replace_all(content, |caps: &Captures| {
            let items = split_list(&caps[1]);
            match uniform_index(Seed::Entropy, items.len()) {
                Some(index) => escape(&items[index]),
                None => empty_list_placeholder.to_string(),
            }
        })
        .into_owned()
}

/// Substitute `{{pick}}` directives with a deterministically chosen item.
///
/// The per-match seed is `hash("{chat_id_hash}-{hash(raw_content)}-{offset}")`,
/// binding the outcome to the chat, the exact pre-substitution template
/// text, and the position of this match. Edits to the template reshuffle
/// outcomes by design.
///
/// The offset is taken from the match's position in `raw_content`, not in
/// the scanned text: earlier passes with variable-length output (dice
/// rolls, entropy picks, timestamps) shift positions in the evolving
/// string, and seeding from those would break reproducibility across
/// regenerations. Matches in order in the scanned text correspond to
/// matches in order in the raw content; a pick that only exists because a
/// substitution introduced it has no raw position and falls back to its
/// scanned offset.
pub(crate) fn pick_replace(
    content: &str,
    raw_content: &str,
    chat_id_hash: u64,
    empty_list_placeholder: &str,
    escape: &dyn Fn(&str) -> String,
) -> String {
    let raw_hash = string_hash(raw_content);
    let raw_offsets: Vec<usize> = PICK_RE.find_iter(raw_content).map(|m| m.start()).collect();
    let mut match_index = 0;
    PICK_RE
        .replace_all(content, |caps: &Captures| {
            let offset = raw_offsets
                .get(match_index)
                .copied()
                .unwrap_or_else(|| caps.get(0).map_or(0, |m| m.start()));
            match_index += 1;
            let items = split_list(&caps[1]);
            let seed = string_hash(&format!("{chat_id_hash}-{raw_hash}-{offset}"));
            match uniform_index(Seed::Fixed(seed), items.len()) {
                Some(index) => escape(&items[index]),
                None => empty_list_placeholder.to_string(),
            }
        })
        .into_owned()
}
