//! Display formatting helpers.
//!
//! Pure functions that turn amounts, progress, and timestamps into strings. They
//! know nothing about Discord, so the bot layer and tests share them.

use crate::config::DisplaySettings;
use crate::core::models::HistoryEntry;
use chrono::{DateTime, Utc};

/// Formats a whole-unit amount with the configured symbol and digit grouping.
///
/// `format_currency(10_000_000, &defaults)` gives `"Rp 10.000.000"`.
#[must_use]
pub fn format_currency(amount: u64, display: &DisplaySettings) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push_str(&display.thousands_separator);
        }
        grouped.push(digit);
    }

    if display.currency_symbol.is_empty() {
        grouped
    } else {
        format!("{} {grouped}", display.currency_symbol)
    }
}

/// Progress towards the goal as an integer percentage, floored and capped at 100.
#[must_use]
pub fn percent_complete(collected: u64, goal: u64) -> u8 {
    if goal == 0 {
        return 100;
    }

    let percent = (u128::from(collected) * 100 / u128::from(goal)).min(100);
    u8::try_from(percent).unwrap_or(100)
}

/// Generates a text progress bar like `[████████░░] 80%`.
#[must_use]
pub fn format_progress_bar(percent: u8, bar_length: usize) -> String {
    let clamped = usize::from(percent.min(100));
    let filled = (clamped * bar_length + 50) / 100;
    let empty = bar_length.saturating_sub(filled);

    format!("[{}{}] {percent}%", "█".repeat(filled), "░".repeat(empty))
}

/// Formats a history entry as `+ Rp 50.000` or `- Rp 25.000`.
#[must_use]
pub fn format_history_amount(entry: &HistoryEntry, display: &DisplaySettings) -> String {
    format!(
        "{} {}",
        entry.kind.sign(),
        format_currency(entry.amount, display)
    )
}

/// Creation date as shown on the detail view, e.g. `5 January 2026`.
#[must_use]
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Transaction timestamp as shown in the history list, e.g. `05/01/2026 08:30`.
#[must_use]
pub fn format_timestamp(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y %H:%M").to_string()
}
