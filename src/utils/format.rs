//! Output formatting utilities

/// Truncate a string to at most `max_len` characters, marking the cut
/// with an ellipsis.
#[must_use]
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len < 3 {
        return "...".to_string();
    }
    let kept: String = s.chars().take(max_len - 3).collect();
    format!("{kept}...")
}

/// Practice time as `Xh Ym`, or `Ym` under an hour.
#[must_use]
pub fn format_minutes(minutes: u64) -> String {
    if minutes >= 60 {
        format!("{}h {}m", minutes / 60, minutes % 60)
    } else {
        format!("{minutes}m")
    }
}

/// `1 skill`, `2 skills`.
#[must_use]
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Confidence as five filled or empty stars.
#[must_use]
pub fn stars(value: u8) -> String {
    let filled = usize::from(value.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}
