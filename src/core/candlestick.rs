use serde::{Deserialize, Serialize};

use crate::core::range::Range;
use crate::core::types::Sample;
use crate::error::{ChartError, ChartResult};

/// Canonical OHLC candle used by candlestick series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcBar {
    pub time: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OhlcBar {
    /// Builds a validated OHLC bar from raw floating values.
    ///
    /// Invariants:
    /// - all values are finite
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    pub fn new(time: f64, open: f64, high: f64, low: f64, close: f64) -> ChartResult<Self> {
        if !time.is_finite()
            || !open.is_finite()
            || !high.is_finite()
            || !low.is_finite()
            || !close.is_finite()
        {
            return Err(ChartError::InvalidData(
                "ohlc values must be finite".to_owned(),
            ));
        }

        if low > high {
            return Err(ChartError::InvalidData(format!(
                "ohlc low {low} must be <= high {high}"
            )));
        }

        if open < low || open > high || close < low || close > high {
            return Err(ChartError::InvalidData(
                "ohlc open/close must be within low/high range".to_owned(),
            ));
        }

        Ok(Self {
            time,
            open,
            high,
            low,
            close,
        })
    }

    pub fn from_sample(sample: &Sample) -> ChartResult<Self> {
        Self::new(
            sample.unix_seconds(),
            sample.open,
            sample.high,
            sample.low,
            sample.close,
        )
    }

    /// Returns `true` when close price is greater than or equal to open price.
    #[must_use]
    pub fn is_bullish(self) -> bool {
        self.close >= self.open
    }
}

/// Projected candle geometry in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandleGeometry {
    pub center_x: i32,
    pub body_left: i32,
    pub body_right: i32,
    pub body_top: i32,
    pub body_bottom: i32,
    pub wick_top: i32,
    pub wick_bottom: i32,
    pub is_bullish: bool,
}

/// Projects one candle onto the canvas.
///
/// `left`/`top` are the canvas origin; the body is centred on the bar's
/// translated x and is at least one pixel wide.
#[must_use]
pub fn project_candle(
    bar: OhlcBar,
    x_range: &Range,
    y_range: &Range,
    left: i32,
    top: i32,
    body_width: i32,
) -> CandleGeometry {
    let center_x = left + x_range.translate(bar.time);
    let half = (body_width.max(1)) / 2;
    let open_y = top + y_range.translate(bar.open);
    let close_y = top + y_range.translate(bar.close);
    CandleGeometry {
        center_x,
        body_left: center_x - half,
        body_right: center_x + half.max(1),
        body_top: open_y.min(close_y),
        body_bottom: open_y.max(close_y),
        wick_top: top + y_range.translate(bar.high),
        wick_bottom: top + y_range.translate(bar.low),
        is_bullish: bar.is_bullish(),
    }
}
