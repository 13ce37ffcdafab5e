//! Tick and annotation label formatters.
//!
//! Time formatters take unix seconds and render wall-clock time in
//! America/New_York, where the quoted exchanges trade.

use chrono_tz::America::New_York;

use crate::core::primitives::unix_seconds_to_datetime;

/// Renders a domain value as a label.
pub type ValueFormatter = fn(f64) -> String;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_DATE_HOUR_FORMAT: &str = "%m-%d %-I%p";
pub const DEFAULT_TIME_HOUR_FORMAT: &str = "%-I:%M%p";

#[must_use]
pub fn float_value_formatter(value: f64) -> String {
    format!("{value:.2}")
}

#[must_use]
pub fn percent_value_formatter(value: f64) -> String {
    format!("{value:.2}%")
}

#[must_use]
pub fn date_value_formatter(value: f64) -> String {
    format_eastern(value, DEFAULT_DATE_FORMAT)
}

#[must_use]
pub fn date_hour_value_formatter(value: f64) -> String {
    format_eastern(value, DEFAULT_DATE_HOUR_FORMAT)
}

#[must_use]
pub fn time_hour_value_formatter(value: f64) -> String {
    format_eastern(value, DEFAULT_TIME_HOUR_FORMAT)
}

fn format_eastern(value: f64, format: &str) -> String {
    unix_seconds_to_datetime(value)
        .with_timezone(&New_York)
        .format(format)
        .to_string()
}
