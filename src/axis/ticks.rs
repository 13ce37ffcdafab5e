use chrono::Duration;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::axis::ValueFormatter;
use crate::core::primitives::datetime_to_unix_seconds;
use crate::core::{ContinuousRange, MarketHoursRange, Range};
use crate::render::Renderer;

/// Calendar-day spans longer than this get one tick per trading day
/// instead of per hour.
const DAILY_TICK_THRESHOLD_DAYS: i64 = 3;

/// A labelled position on an axis, in domain units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

impl Tick {
    #[must_use]
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Which label extent limits tick density.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDirection {
    /// Ticks spread along x; label widths set the spacing.
    Horizontal,
    /// Ticks spread along y; label heights set the spacing.
    Vertical,
}

/// Generates ticks for `range` at the renderer's current font size.
#[must_use]
pub fn generate_ticks(
    renderer: &dyn Renderer,
    range: &Range,
    formatter: ValueFormatter,
    direction: TickDirection,
    minimum_spacing: i32,
) -> Vec<Tick> {
    let ticks = match range {
        Range::Continuous(continuous) => {
            continuous_ticks(renderer, continuous, formatter, direction, minimum_spacing)
        }
        Range::MarketHours(market) => market_hours_ticks(market, formatter),
    };
    normalize_ticks(ticks)
}

/// Evenly spaced ticks from min to max.
///
/// `count = ceil(domain / (label_extent + minimum_spacing))` where the label
/// extent belongs to the longer of the formatted min and max.
#[must_use]
pub fn continuous_ticks(
    renderer: &dyn Renderer,
    range: &ContinuousRange,
    formatter: ValueFormatter,
    direction: TickDirection,
    minimum_spacing: i32,
) -> Vec<Tick> {
    let min = range.min();
    let max = range.max();
    if range.delta() == 0.0 {
        return vec![Tick::new(min, formatter(min))];
    }

    let extent = [formatter(min), formatter(max)]
        .iter()
        .map(|label| {
            let measured = renderer.measure_text(label);
            match direction {
                TickDirection::Horizontal => measured.width,
                TickDirection::Vertical => measured.height,
            }
        })
        .max()
        .unwrap_or_default();
    let slot = (extent + minimum_spacing).max(1);
    let count = (f64::from(range.domain()) / f64::from(slot)).ceil().max(1.0) as usize;
    let step = range.delta() / count as f64;
    trace!(count, step, extent, "continuous tick layout");

    (0..=count)
        .map(|index| {
            let value = if index == count {
                max
            } else {
                min + step * index as f64
            };
            Tick::new(value, formatter(value))
        })
        .collect()
}

/// Session-aware ticks for a market hours range.
///
/// Spans over three calendar days (session timezone, min date to max date)
/// get one tick per trading day at the close. Shorter
/// spans get hourly ticks from each session open, jumping to the next open
/// once the cursor leaves the session.
#[must_use]
pub fn market_hours_ticks(range: &MarketHoursRange, formatter: ValueFormatter) -> Vec<Tick> {
    let session = range.session();
    let min = range.min_time();
    let max = range.effective_max();
    let tick_at = |local: chrono::NaiveDateTime| {
        let value = datetime_to_unix_seconds(session.to_utc(local));
        Tick::new(value, formatter(value))
    };

    let span_days =
        (session.local(range.max_time()).date() - session.local(min).date()).num_days();
    if span_days > DAILY_TICK_THRESHOLD_DAYS {
        return range
            .trading_days()
            .map(|day| session.to_utc(session.close_on(day)))
            .filter(|close| *close >= min && *close <= max)
            .map(|close| {
                let value = datetime_to_unix_seconds(close);
                Tick::new(value, formatter(value))
            })
            .collect();
    }

    let last = session.local(max);
    let first = session.local(min);
    let mut ticks = Vec::new();
    let mut cursor = if session.is_trading_day(first.date())
        && first <= session.close_on(first.date())
    {
        Some(session.open_on(first.date()))
    } else {
        session.next_market_open(first)
    };
    while let Some(at) = cursor {
        if at > last {
            break;
        }
        if at >= first {
            ticks.push(tick_at(at));
        }
        let next = at + Duration::hours(1);
        cursor = if next > session.close_on(at.date()) {
            session.next_market_open(at)
        } else {
            Some(next)
        };
    }
    ticks
}

/// Sorts by value and drops repeated values, keeping the first label.
#[must_use]
pub fn normalize_ticks(mut ticks: Vec<Tick>) -> Vec<Tick> {
    ticks.sort_by_key(|tick| OrderedFloat(tick.value));
    ticks.dedup_by_key(|tick| OrderedFloat(tick.value));
    ticks
}
