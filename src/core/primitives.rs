use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Inverse of `datetime_to_unix_seconds`, at millisecond precision.
///
/// Out-of-range values saturate to the unix epoch.
#[must_use]
pub fn unix_seconds_to_datetime(seconds: f64) -> DateTime<Utc> {
    if !seconds.is_finite() {
        return DateTime::<Utc>::UNIX_EPOCH;
    }
    let millis = (seconds * 1000.0).round();
    if millis > i64::MAX as f64 || millis < i64::MIN as f64 {
        return DateTime::<Utc>::UNIX_EPOCH;
    }
    DateTime::<Utc>::from_timestamp_millis(millis as i64).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Min and max of a value slice in one pass; `None` when empty.
#[must_use]
pub fn min_max(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}
