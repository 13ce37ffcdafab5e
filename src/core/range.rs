use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::market_hours::MarketHoursRange;
use crate::core::primitives::min_max;
use crate::error::{ChartError, ChartResult};

/// Direction in which a continuous range lays values onto pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RangeOrientation {
    /// Larger values map to smaller pixel offsets (top-left origin value axis).
    #[default]
    HighToLow,
    /// Larger values map to larger pixel offsets (left-to-right time axis).
    LowToHigh,
}

/// Linear mapping of an `f64` domain onto `[0, domain]` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContinuousRange {
    min: f64,
    max: f64,
    domain: i32,
    orientation: RangeOrientation,
}

impl ContinuousRange {
    /// Fits min/max from `values` in a single scan.
    pub fn new_continuous(values: &[f64]) -> ChartResult<Self> {
        if values.iter().any(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(
                "range values must be finite".to_owned(),
            ));
        }
        let (min, max) = min_max(values.iter().copied()).ok_or_else(|| {
            ChartError::EmptySeries("cannot build a range from no values".to_owned())
        })?;
        Ok(Self {
            min,
            max,
            domain: 0,
            orientation: RangeOrientation::default(),
        })
    }

    pub fn from_bounds(min: f64, max: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::InvalidData(
                "range bounds must be finite".to_owned(),
            ));
        }
        if max < min {
            return Err(ChartError::InvalidData(format!(
                "range max {max} must be >= min {min}"
            )));
        }
        Ok(Self {
            min,
            max,
            domain: 0,
            orientation: RangeOrientation::default(),
        })
    }

    #[must_use]
    pub fn with_domain(mut self, domain: i32) -> Self {
        self.domain = domain;
        self
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: RangeOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn domain(&self) -> i32 {
        self.domain
    }

    pub fn set_domain(&mut self, domain: i32) {
        self.domain = domain;
    }

    #[must_use]
    pub fn orientation(&self) -> RangeOrientation {
        self.orientation
    }

    #[must_use]
    pub fn delta(&self) -> f64 {
        self.max - self.min
    }

    /// Maps `value` to a pixel offset in `[0, domain]`.
    ///
    /// A degenerate range (`min == max`) maps every value to `domain / 2`.
    #[must_use]
    pub fn translate(&self, value: f64) -> i32 {
        let delta = self.delta();
        if delta == 0.0 {
            return self.domain / 2;
        }
        let ratio = match self.orientation {
            RangeOrientation::HighToLow => (self.max - value) / delta,
            RangeOrientation::LowToHigh => (value - self.min) / delta,
        };
        (ratio * f64::from(self.domain)).floor() as i32
    }
}

/// Domain-to-pixel mapping used by axes and series placement.
#[derive(Debug, Clone)]
pub enum Range {
    Continuous(ContinuousRange),
    MarketHours(MarketHoursRange),
}

impl Range {
    #[must_use]
    pub fn min(&self) -> f64 {
        match self {
            Self::Continuous(range) => range.min(),
            Self::MarketHours(range) => range.min(),
        }
    }

    /// Upper bound; for market hours this is the effective max.
    #[must_use]
    pub fn max(&self) -> f64 {
        match self {
            Self::Continuous(range) => range.max(),
            Self::MarketHours(range) => range.max(),
        }
    }

    #[must_use]
    pub fn delta(&self) -> f64 {
        self.max() - self.min()
    }

    #[must_use]
    pub fn domain(&self) -> i32 {
        match self {
            Self::Continuous(range) => range.domain(),
            Self::MarketHours(range) => range.domain(),
        }
    }

    pub fn set_domain(&mut self, domain: i32) {
        match self {
            Self::Continuous(range) => range.set_domain(domain),
            Self::MarketHours(range) => range.set_domain(domain),
        }
    }

    #[must_use]
    pub fn translate(&self, value: f64) -> i32 {
        match self {
            Self::Continuous(range) => range.translate(value),
            Self::MarketHours(range) => range.translate(value),
        }
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        match self {
            Self::Continuous(range) => range.delta() == 0.0,
            Self::MarketHours(range) => range.total_market_seconds() <= 0,
        }
    }
}

impl From<ContinuousRange> for Range {
    fn from(range: ContinuousRange) -> Self {
        Self::Continuous(range)
    }
}

impl From<MarketHoursRange> for Range {
    fn from(range: MarketHoursRange) -> Self {
        Self::MarketHours(range)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continuous(range) => write!(
                f,
                "ContinuousRange [{:.4}, {:.4}] => {}",
                range.min(),
                range.max(),
                range.domain()
            ),
            Self::MarketHours(range) => fmt::Display::fmt(range, f),
        }
    }
}
