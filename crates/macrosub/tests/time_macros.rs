//! Tests for time/date macros, idle duration, and duration humanization.

use chrono::{Datelike, Duration, Local, Utc};
use macrosub::{
    ChatMessage, ChatMetadata, EvalContext, MacroEngine, MacroEnv, humanize_duration,
};

fn expand(chat: &[ChatMessage], content: &str) -> String {
    let engine = MacroEngine::new();
    let mut env = MacroEnv::new();
    let mut metadata = ChatMetadata::default();
    let mut ctx = EvalContext::new(chat, &mut metadata, "chat");
    engine.evaluate(content, &mut env, &mut ctx)
}

fn message(minutes_ago: i64, is_user: bool) -> ChatMessage {
    ChatMessage {
        is_user,
        text: "line".to_string(),
        send_date: Some(Utc::now() - Duration::minutes(minutes_ago)),
        ..ChatMessage::default()
    }
}

// === Clock and Date Macros ===

#[test]
fn isodate_is_a_calendar_date() {
    let out = expand(&[], "{{isodate}}");
    assert_eq!(out.len(), 10);
    let parts: Vec<&str> = out.split('-').collect();
    assert_eq!(parts.len(), 3);
    assert!(parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())));
}

#[test]
fn isotime_is_hours_and_minutes() {
    let out = expand(&[], "{{isotime}}");
    assert_eq!(out.len(), 5);
    assert_eq!(out.as_bytes()[2], b':');
}

#[test]
fn time_uses_a_twelve_hour_clock() {
    let out = expand(&[], "{{time}}");
    assert!(out.ends_with("AM") || out.ends_with("PM"), "got: {out}");
    assert!(out.contains(':'));
}

#[test]
fn weekday_is_a_day_name() {
    let out = expand(&[], "{{weekday}}");
    let days = [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ];
    assert!(days.contains(&out.as_str()), "got: {out}");
}

#[test]
fn datetimeformat_uses_the_caller_pattern() {
    let out = expand(&[], "{{datetimeformat %Y}}");
    assert_eq!(out, Local::now().year().to_string());
}

#[test]
fn time_utc_formats_at_the_given_offset() {
    let out = expand(&[], "{{time_UTC+2}}");
    assert!(out.ends_with("AM") || out.ends_with("PM"), "got: {out}");

    // Out-of-range offsets degrade to empty.
    assert_eq!(expand(&[], "{{time_UTC+99}}"), "");
}

// === Idle Duration ===

#[test]
fn idle_duration_measures_since_the_users_last_turn() {
    let chat = vec![message(5, true), message(1, false)];
    assert_eq!(expand(&chat, "{{idle_duration}}"), "5 minutes");
}

#[test]
fn idle_duration_skips_system_messages() {
    let mut note = message(0, false);
    note.is_system = true;
    let chat = vec![message(7, true), message(1, false), note];
    assert_eq!(expand(&chat, "{{idle_duration}}"), "7 minutes");
}

#[test]
fn idle_duration_falls_back_to_just_now() {
    assert_eq!(expand(&[], "{{idle_duration}}"), "just now");

    // A lone user message has no following turn to anchor on.
    let chat = vec![message(5, true)];
    assert_eq!(expand(&chat, "{{idle_duration}}"), "just now");
}

// === Time Difference ===

#[test]
fn time_diff_humanizes_the_gap() {
    assert_eq!(
        expand(
            &[],
            "{{timeDiff::2023-01-01 02:00:00::2023-01-01 00:00:00}}"
        ),
        "2 hours"
    );
    // Magnitude only: order does not matter.
    assert_eq!(
        expand(
            &[],
            "{{timeDiff::2023-01-01 00:00:00::2023-01-01 02:00:00}}"
        ),
        "2 hours"
    );
}

#[test]
fn time_diff_accepts_bare_dates() {
    assert_eq!(
        expand(&[], "{{timeDiff::2023-03-01::2023-03-02}}"),
        "a day"
    );
}

#[test]
fn time_diff_with_unparsable_input_degrades_to_empty() {
    assert_eq!(expand(&[], "{{timeDiff::soon::later}}"), "");
}

// === Humanization Thresholds ===

#[test]
fn humanize_duration_covers_the_scale() {
    assert_eq!(humanize_duration(Duration::seconds(0)), "a few seconds");
    assert_eq!(humanize_duration(Duration::seconds(44)), "a few seconds");
    assert_eq!(humanize_duration(Duration::seconds(60)), "a minute");
    assert_eq!(humanize_duration(Duration::minutes(5)), "5 minutes");
    assert_eq!(humanize_duration(Duration::minutes(50)), "an hour");
    assert_eq!(humanize_duration(Duration::hours(3)), "3 hours");
    assert_eq!(humanize_duration(Duration::hours(30)), "a day");
    assert_eq!(humanize_duration(Duration::days(10)), "10 days");
    assert_eq!(humanize_duration(Duration::days(40)), "a month");
    assert_eq!(humanize_duration(Duration::days(100)), "3 months");
    assert_eq!(humanize_duration(Duration::days(400)), "a year");
    assert_eq!(humanize_duration(Duration::days(800)), "2 years");
}

#[test]
fn humanize_duration_ignores_sign() {
    assert_eq!(humanize_duration(Duration::hours(-3)), "3 hours");
}
