use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::axis::{ValueFormatter, date_hour_value_formatter, date_value_formatter};
use crate::error::{ChartError, ChartResult};

/// How the horizontal axis maps time onto pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeframeClass {
    /// Linear calendar time; suits daily bars.
    #[default]
    Continuous,
    /// Trading seconds only; suits intraday quotes.
    MarketHours,
}

/// Look-back window of a chart request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Timeframe {
    FiveYears,
    TwoYears,
    #[default]
    LastTwelveMonths,
    SixMonths,
    ThreeMonths,
    TwoMonths,
    OneMonth,
    OneWeek,
    TenDays,
    ThreeDays,
    OneDay,
}

enum Span {
    Months(u32),
    Days(u64),
}

impl Timeframe {
    /// Parses a case-insensitive timeframe code such as `ltm` or `1wk`.
    pub fn parse(value: &str) -> ChartResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "5y" => Ok(Self::FiveYears),
            "2y" => Ok(Self::TwoYears),
            "ltm" => Ok(Self::LastTwelveMonths),
            "6m" => Ok(Self::SixMonths),
            "3m" => Ok(Self::ThreeMonths),
            "2m" => Ok(Self::TwoMonths),
            "1m" => Ok(Self::OneMonth),
            "1wk" => Ok(Self::OneWeek),
            "10d" => Ok(Self::TenDays),
            "3d" => Ok(Self::ThreeDays),
            "1d" => Ok(Self::OneDay),
            _ => Err(ChartError::config(format!("invalid timeframe `{value}`"))),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FiveYears => "5Y",
            Self::TwoYears => "2Y",
            Self::LastTwelveMonths => "LTM",
            Self::SixMonths => "6M",
            Self::ThreeMonths => "3M",
            Self::TwoMonths => "2M",
            Self::OneMonth => "1M",
            Self::OneWeek => "1WK",
            Self::TenDays => "10D",
            Self::ThreeDays => "3D",
            Self::OneDay => "1D",
        }
    }

    #[must_use]
    pub fn class(self) -> TimeframeClass {
        match self {
            Self::FiveYears
            | Self::TwoYears
            | Self::LastTwelveMonths
            | Self::SixMonths
            | Self::ThreeMonths
            | Self::TwoMonths => TimeframeClass::Continuous,
            Self::OneMonth | Self::OneWeek | Self::TenDays | Self::ThreeDays | Self::OneDay => {
                TimeframeClass::MarketHours
            }
        }
    }

    /// Label formatter for the time axis.
    #[must_use]
    pub fn x_value_formatter(self) -> ValueFormatter {
        match self {
            Self::ThreeDays | Self::OneDay => date_hour_value_formatter,
            _ => date_value_formatter,
        }
    }

    fn span(self) -> Span {
        match self {
            Self::FiveYears => Span::Months(60),
            Self::TwoYears => Span::Months(24),
            Self::LastTwelveMonths => Span::Months(12),
            Self::SixMonths => Span::Months(6),
            Self::ThreeMonths => Span::Months(3),
            Self::TwoMonths => Span::Months(2),
            Self::OneMonth => Span::Months(1),
            Self::OneWeek => Span::Days(7),
            Self::TenDays => Span::Days(10),
            Self::ThreeDays => Span::Days(3),
            Self::OneDay => Span::Days(1),
        }
    }

    /// `[start, end]` instants of the window that ends at `now`.
    pub fn window_ending(self, now: DateTime<Utc>) -> ChartResult<(DateTime<Utc>, DateTime<Utc>)> {
        let start = match self.span() {
            Span::Months(months) => now.checked_sub_months(Months::new(months)),
            Span::Days(days) => now.checked_sub_days(Days::new(days)),
        };
        let start = start.ok_or_else(|| {
            ChartError::InvalidData(format!("timeframe {self} underflows from {now}"))
        })?;
        Ok((start, now))
    }
}

impl FromStr for Timeframe {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Timeframe {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Timeframe> for String {
    fn from(timeframe: Timeframe) -> Self {
        timeframe.as_str().to_owned()
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
