//! Formatting helpers shared by the report views

use crate::reports::MonthStatus;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    let magnitude = pct.abs();
    if magnitude < 0.1 && magnitude > 0.0 {
        format!("{:.2}%", pct)
    } else if magnitude < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Signed percentage for change figures, e.g. `+12.5%`
pub fn format_change(pct: f64) -> String {
    if pct > 0.0 {
        format!("+{}", format_percentage(pct))
    } else {
        format_percentage(pct)
    }
}

/// Progress bar of `width` cells for `value` out of `max_value`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Short marker for a calendar cell
pub fn status_badge(status: MonthStatus) -> &'static str {
    match status {
        MonthStatus::None => "·",
        MonthStatus::Ok => "✓",
        MonthStatus::Warning => "!",
        MonthStatus::Exceeded => "✗",
    }
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate to at most `max_len` characters with an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
