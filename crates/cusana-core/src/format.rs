//! Display formatting for dates, names and snippets.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use crate::model::Email;

/// Parses a store timestamp into local wall-clock time.
///
/// Offset-qualified timestamps are converted to the local zone; naive ones
/// are taken as already local.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Date shown in the message list: time of day for unread messages,
/// day and month otherwise.
#[must_use]
pub fn list_date(email: &Email) -> String {
    parse_timestamp(&email.date).map_or_else(
        || email.date.clone(),
        |dt| {
            if email.is_read {
                dt.format("%d %b").to_string()
            } else {
                dt.format("%H:%M").to_string()
            }
        },
    )
}

/// Full date shown in the detail pane, e.g. `10 Dec 2024 09:00`.
#[must_use]
pub fn detail_date(value: &str) -> String {
    parse_timestamp(value).map_or_else(
        || value.to_string(),
        |dt| dt.format("%d %b %Y %H:%M").to_string(),
    )
}

/// Initials for an avatar: first letters of the first and last words.
#[must_use]
pub fn initials(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    let first_letter = |s: &str| s.chars().next().unwrap_or('?');
    match parts.as_slice() {
        [] => "?".to_string(),
        [only] => first_letter(*only).to_uppercase().to_string(),
        [first, .., last] => format!(
            "{}{}",
            first_letter(*first).to_uppercase(),
            first_letter(*last).to_uppercase()
        ),
    }
}

/// Stable palette slot for a name, in `0..slots`.
#[must_use]
pub fn avatar_slot(name: &str, slots: usize) -> usize {
    if slots == 0 {
        return 0;
    }
    let hash: usize = name.bytes().map(usize::from).sum();
    hash % slots
}

/// Truncates to `max_len` characters, ending with `...` when shortened.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
