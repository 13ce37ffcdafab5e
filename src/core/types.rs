use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.is_valid() || self.width > i32::MAX as u32 || self.height > i32::MAX as u32 {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// One plotted value: `x` is unix seconds (or a plain scalar), `y` the value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One upper/lower pair of a band series at a given `x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundedPoint {
    pub x: f64,
    pub upper: f64,
    pub lower: f64,
}

/// A fetched price quote as handed over by the storage/fetch collaborators.
///
/// Sequences of samples are expected in ascending `timestamp` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    #[serde(default)]
    pub volume: i64,
    #[serde(default)]
    pub open: f64,
    #[serde(default)]
    pub high: f64,
    #[serde(default)]
    pub low: f64,
    #[serde(default)]
    pub close: f64,
    #[serde(default)]
    pub is_historical: bool,
}

impl Sample {
    /// Builds a live (non-historical) sample carrying only a price.
    ///
    /// OHLC fields are all set to `price`.
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self {
            timestamp,
            price,
            volume: 0,
            open: price,
            high: price,
            low: price,
            close: price,
            is_historical: false,
        }
    }

    /// Builds a historical sample from a daily OHLC bar; `price` is the close.
    #[must_use]
    pub fn historical(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: i64,
    ) -> Self {
        Self {
            timestamp,
            price: close,
            volume,
            open,
            high,
            low,
            close,
            is_historical: true,
        }
    }

    /// Converts decimal quote values into a sample.
    pub fn from_decimal_quote(
        timestamp: DateTime<Utc>,
        price: Decimal,
        volume: i64,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        is_historical: bool,
    ) -> ChartResult<Self> {
        let sample = Self {
            timestamp,
            price: decimal_to_f64(price, "price")?,
            volume,
            open: decimal_to_f64(open, "open")?,
            high: decimal_to_f64(high, "high")?,
            low: decimal_to_f64(low, "low")?,
            close: decimal_to_f64(close, "close")?,
            is_historical,
        };
        sample.validate()?;
        Ok(sample)
    }

    #[must_use]
    pub fn unix_seconds(&self) -> f64 {
        datetime_to_unix_seconds(self.timestamp)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.price.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "sample price at {} must be finite",
                self.timestamp
            )));
        }
        Ok(())
    }
}

/// Integer pixel rectangle in top-left-origin coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelBox {
    pub top: i32,
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelBox {
    #[must_use]
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
        }
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Returns the box shrunk by `padding` on each side.
    ///
    /// Sides never cross: an over-padded box collapses to zero size.
    #[must_use]
    pub fn shrink(&self, padding: Padding) -> Self {
        let left = self.left + padding.left;
        let top = self.top + padding.top;
        Self {
            left,
            top,
            right: (self.right - padding.right).max(left),
            bottom: (self.bottom - padding.bottom).max(top),
        }
    }
}

/// Per-side spacing in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub top: i32,
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Padding {
    #[must_use]
    pub const fn uniform(value: i32) -> Self {
        Self {
            top: value,
            left: value,
            right: value,
            bottom: value,
        }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.top == 0 && self.left == 0 && self.right == 0 && self.bottom == 0
    }
}
