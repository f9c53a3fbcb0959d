//! Text building blocks shared by the menu screens.

use chrono::{NaiveDate, NaiveDateTime};

pub const SEPARATOR: &str = "------------------------------";

const BAR_WIDTH: usize = 10;
const MAX_STARS: usize = 5;

/// `[======----] 60%` style bar. `percent` is clamped to 0..=100.
pub fn progress_bar(percent: f64) -> String {
    let percent = if percent.is_finite() { percent.clamp(0.0, 100.0) } else { 0.0 };
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:.0}%",
        "=".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        percent
    )
}

/// `***--` for three of five stars.
pub fn stars(filled: usize) -> String {
    let filled = filled.min(MAX_STARS);
    format!("{}{}", "*".repeat(filled), "-".repeat(MAX_STARS - filled))
}

/// `HH:MM`, or `-` when the time is missing.
pub fn time_or_dash(at: Option<NaiveDateTime>) -> String {
    at.map(|t| t.format("%H:%M").to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn day_label(date: NaiveDate) -> String {
    date.format("%a %d %b %Y").to_string()
}
