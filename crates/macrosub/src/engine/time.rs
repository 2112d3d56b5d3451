//! Time and date macros: clock/date stamps, caller-formatted timestamps,
//! idle duration, UTC-offset time, and timestamp differences.

use std::fmt::Write as _;
use std::sync::LazyLock;

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, Utc};
use regex::{Captures, Regex};

use crate::types::ChatMessage;

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{time\}\}").expect("valid regex")
});
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{date\}\}").expect("valid regex")
});
static WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{weekday\}\}").expect("valid regex")
});
static ISO_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{isotime\}\}").expect("valid regex")
});
static ISO_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{isodate\}\}").expect("valid regex")
});
static DATETIME_FORMAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{datetimeformat +([^}]*)\}\}").expect("valid regex")
});
static IDLE_DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{idle_duration\}\}").expect("valid regex")
});
static TIME_UTC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{time_UTC([-+]\d+)\}\}").expect("valid regex")
});
static TIME_DIFF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{\{timeDiff::(.*?)::(.*?)\}\}").expect("valid regex")
});

/// Substitute the current time, date, weekday, and ISO time/date macros.
pub(crate) fn replace_time_macros(content: &str, escape: &dyn Fn(&str) -> String) -> String {
    let now = Local::now();
    let mut content = TIME_RE
        .replace_all(content, |_: &Captures| {
            escape(&now.format("%-I:%M %p").to_string())
        })
        .into_owned();
    content = DATE_RE
        .replace_all(&content, |_: &Captures| {
            escape(&now.format("%B %-d, %Y").to_string())
        })
        .into_owned();
    content = WEEKDAY_RE
        .replace_all(&content, |_: &Captures| {
            escape(&now.format("%A").to_string())
        })
        .into_owned();
    content = ISO_TIME_RE
        .replace_all(&content, |_: &Captures| {
            escape(&now.format("%H:%M").to_string())
        })
        .into_owned();
    content = ISO_DATE_RE
        .replace_all(&content, |_: &Captures| {
            escape(&now.format("%Y-%m-%d").to_string())
        })
        .into_owned();
    content
}

/// Substitute `{{datetimeformat <fmt>}}` using the caller's strftime
/// pattern. An unsupported pattern degrades to empty text.
pub(crate) fn replace_datetimeformat(content: &str, escape: &dyn Fn(&str) -> String) -> String {
    DATETIME_FORMAT_RE
        .replace_all(content, |caps: &Captures| {
            let mut formatted = String::new();
            if write!(formatted, "{}", Local::now().format(caps[1].trim())).is_err() {
                formatted.clear();
            }
            escape(&formatted)
        })
        .into_owned()
}

/// Substitute `{{idle_duration}}` with a humanized elapsed time since
/// the user's most recent message. Not escaped: the phrase is computed
/// internally, not environment-sourced.
pub(crate) fn replace_idle_duration(content: &str, chat: &[ChatMessage]) -> String {
    if !IDLE_DURATION_RE.is_match(content) {
        return content.to_string();
    }
    let phrase = idle_duration(chat, Utc::now());
    IDLE_DURATION_RE
        .replace_all(content, |_: &Captures| phrase.clone())
        .into_owned()
}

/// Substitute `{{time_UTC±N}}` with the current time at that offset.
pub(crate) fn replace_time_utc(content: &str, escape: &dyn Fn(&str) -> String) -> String {
    TIME_UTC_RE
        .replace_all(content, |caps: &Captures| {
            let Ok(offset_hours) = caps[1].parse::<i32>() else {
                return String::new();
            };
            let Some(offset) = FixedOffset::east_opt(offset_hours.saturating_mul(3600)) else {
                return String::new();
            };
            let shifted = Utc::now().with_timezone(&offset);
            escape(&shifted.format("%-I:%M %p").to_string())
        })
        .into_owned()
}

/// Substitute `{{timeDiff::(a)::(b)}}` with the humanized difference
/// between two parsable timestamps. Unparsable input degrades to empty.
pub(crate) fn replace_time_diff(content: &str, escape: &dyn Fn(&str) -> String) -> String {
    TIME_DIFF_RE
        .replace_all(content, |caps: &Captures| {
            match (parse_timestamp(&caps[1]), parse_timestamp(&caps[2])) {
                (Some(a), Some(b)) => escape(&humanize_duration(a.signed_duration_since(b))),
                _ => String::new(),
            }
        })
        .into_owned()
}

/// Humanized elapsed time since the user's last message.
///
/// Scans backward, skipping system messages. The first non-system
/// message arms the scan; the next user message after it is the one the
/// user has been idle since. Falls back to "just now" when the chat has
/// no such message or it carries no timestamp.
fn idle_duration(chat: &[ChatMessage], now: DateTime<Utc>) -> String {
    let mut last: Option<&ChatMessage> = None;
    let mut take_next = false;
    for message in chat.iter().rev() {
        if message.is_system {
            continue;
        }
        if message.is_user && take_next {
            last = Some(message);
            break;
        }
        take_next = true;
    }
    match last.and_then(|m| m.send_date) {
        Some(sent) => humanize_duration(now.signed_duration_since(sent)),
        None => "just now".to_string(),
    }
}

/// Parse a timestamp from RFC 3339 or common date/date-time forms.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

/// Coarse duration phrase in the style of moment.js humanization.
///
/// Magnitude only, no "ago"/"in" phrasing. The sign of the duration is
/// ignored.
///
/// # Example
///
/// ```
/// use chrono::Duration;
/// use macrosub::humanize_duration;
///
/// assert_eq!(humanize_duration(Duration::seconds(10)), "a few seconds");
/// assert_eq!(humanize_duration(Duration::minutes(5)), "5 minutes");
/// assert_eq!(humanize_duration(Duration::hours(2)), "2 hours");
/// assert_eq!(humanize_duration(Duration::days(40)), "a month");
/// ```
pub fn humanize_duration(duration: Duration) -> String {
    let seconds = duration.num_seconds().abs();
    if seconds < 45 {
        return "a few seconds".to_string();
    }
    if seconds < 90 {
        return "a minute".to_string();
    }
    let minutes = (seconds as f64 / 60.0).round() as i64;
    if minutes < 45 {
        return format!("{minutes} minutes");
    }
    if minutes < 90 {
        return "an hour".to_string();
    }
    let hours = (minutes as f64 / 60.0).round() as i64;
    if hours < 22 {
        return format!("{hours} hours");
    }
    if hours < 36 {
        return "a day".to_string();
    }
    let days = (hours as f64 / 24.0).round() as i64;
    if days < 26 {
        return format!("{days} days");
    }
    if days < 46 {
        return "a month".to_string();
    }
    if days < 320 {
        let months = (days as f64 / 30.44).round() as i64;
        return format!("{months} months");
    }
    if days < 548 {
        return "a year".to_string();
    }
    let years = (days as f64 / 365.25).round() as i64;
    format!("{years} years")
}
