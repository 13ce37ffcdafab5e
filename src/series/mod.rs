//! Plottable series: leaf price/candle data and derived indicators.
//!
//! Derived series own a boxed copy of the series they were computed from and
//! materialize their values at construction, so lookups are plain indexing.

mod annotation;
mod bollinger;
mod candlestick;
mod macd;
mod moving_average;
mod price;
mod regression;
mod render;

pub use annotation::AnnotationSeries;
pub use bollinger::BollingerBandsSeries;
pub use candlestick::CandlestickSeries;
pub use macd::{MacdComputation, MacdHistogramSeries, MacdLineSeries, MacdParams, MacdSignalSeries};
pub use moving_average::{EmaSeries, SmaSeries};
pub use price::PriceSeries;
pub use regression::{LinearRegressionSeries, PolynomialRegressionSeries, RegressionWindow};
pub use render::Placement;

use serde::{Deserialize, Serialize};

use crate::core::primitives::min_max;
use crate::core::{BoundedPoint, DataPoint, Style};

/// Which vertical axis a series is placed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum YAxisType {
    #[default]
    Primary,
    Secondary,
}

/// Identity and presentation shared by every series kind.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesHeader {
    pub name: String,
    pub style: Style,
    pub y_axis: YAxisType,
}

impl SeriesHeader {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            style: Style::default(),
            y_axis: YAxisType::Primary,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Series {
    Price(PriceSeries),
    Sma(SmaSeries),
    Ema(EmaSeries),
    BollingerBands(BollingerBandsSeries),
    MacdLine(MacdLineSeries),
    MacdSignal(MacdSignalSeries),
    MacdHistogram(MacdHistogramSeries),
    LinearRegression(LinearRegressionSeries),
    PolynomialRegression(PolynomialRegressionSeries),
    Annotation(AnnotationSeries),
    Candlestick(CandlestickSeries),
}

impl Series {
    #[must_use]
    pub fn header(&self) -> &SeriesHeader {
        match self {
            Self::Price(series) => &series.header,
            Self::Sma(series) => &series.header,
            Self::Ema(series) => &series.header,
            Self::BollingerBands(series) => &series.header,
            Self::MacdLine(series) => &series.header,
            Self::MacdSignal(series) => &series.header,
            Self::MacdHistogram(series) => &series.header,
            Self::LinearRegression(series) => &series.header,
            Self::PolynomialRegression(series) => &series.header,
            Self::Annotation(series) => &series.header,
            Self::Candlestick(series) => &series.header,
        }
    }

    fn header_mut(&mut self) -> &mut SeriesHeader {
        match self {
            Self::Price(series) => &mut series.header,
            Self::Sma(series) => &mut series.header,
            Self::Ema(series) => &mut series.header,
            Self::BollingerBands(series) => &mut series.header,
            Self::MacdLine(series) => &mut series.header,
            Self::MacdSignal(series) => &mut series.header,
            Self::MacdHistogram(series) => &mut series.header,
            Self::LinearRegression(series) => &mut series.header,
            Self::PolynomialRegression(series) => &mut series.header,
            Self::Annotation(series) => &mut series.header,
            Self::Candlestick(series) => &mut series.header,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.header().name
    }

    #[must_use]
    pub fn style(&self) -> &Style {
        &self.header().style
    }

    #[must_use]
    pub fn y_axis(&self) -> YAxisType {
        self.header().y_axis
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.header_mut().style = style;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, y_axis: YAxisType) -> Self {
        self.header_mut().y_axis = y_axis;
        self
    }

    /// Short kind label used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Price(_) => "price",
            Self::Sma(_) => "sma",
            Self::Ema(_) => "ema",
            Self::BollingerBands(_) => "bollinger_bands",
            Self::MacdLine(_) => "macd_line",
            Self::MacdSignal(_) => "macd_signal",
            Self::MacdHistogram(_) => "macd_histogram",
            Self::LinearRegression(_) => "linear_regression",
            Self::PolynomialRegression(_) => "polynomial_regression",
            Self::Annotation(_) => "annotation",
            Self::Candlestick(_) => "candlestick",
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Price(series) => series.len(),
            Self::Sma(series) => series.len(),
            Self::Ema(series) => series.len(),
            Self::BollingerBands(series) => series.len(),
            Self::MacdLine(series) => series.len(),
            Self::MacdSignal(series) => series.len(),
            Self::MacdHistogram(series) => series.len(),
            Self::LinearRegression(series) => series.len(),
            Self::PolynomialRegression(series) => series.len(),
            Self::Annotation(series) => series.len(),
            Self::Candlestick(series) => series.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Point `i`; band series report their middle line, candles their close.
    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<DataPoint> {
        match self {
            Self::Price(series) => series.value_at(index),
            Self::Sma(series) => series.value_at(index),
            Self::Ema(series) => series.value_at(index),
            Self::BollingerBands(series) => series.value_at(index),
            Self::MacdLine(series) => series.value_at(index),
            Self::MacdSignal(series) => series.value_at(index),
            Self::MacdHistogram(series) => series.value_at(index),
            Self::LinearRegression(series) => series.value_at(index),
            Self::PolynomialRegression(series) => series.value_at(index),
            Self::Annotation(series) => series.value_at(index),
            Self::Candlestick(series) => series.value_at(index),
        }
    }

    #[must_use]
    pub fn last_value(&self) -> Option<DataPoint> {
        self.len()
            .checked_sub(1)
            .and_then(|index| self.value_at(index))
    }

    /// Upper/lower pair at `i`; `None` for series without bands.
    #[must_use]
    pub fn bounded_value_at(&self, index: usize) -> Option<BoundedPoint> {
        match self {
            Self::BollingerBands(series) => series.bounded_value_at(index),
            _ => None,
        }
    }

    #[must_use]
    pub fn bounded_last_value(&self) -> Option<BoundedPoint> {
        match self {
            Self::BollingerBands(series) => series.bounded_last_value(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_annotation(&self) -> bool {
        matches!(self, Self::Annotation(_))
    }

    /// Whether the series is drawn at all.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.style().show
    }

    /// Every `(x, y)` point in index order.
    #[must_use]
    pub fn points(&self) -> Vec<DataPoint> {
        (0..self.len()).filter_map(|index| self.value_at(index)).collect()
    }

    /// Y values only, in index order.
    #[must_use]
    pub fn y_values(&self) -> Vec<f64> {
        (0..self.len())
            .filter_map(|index| self.value_at(index).map(|point| point.y))
            .collect()
    }

    /// Horizontal extent of the series.
    #[must_use]
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        min_max((0..self.len()).filter_map(|index| self.value_at(index).map(|point| point.x)))
    }

    /// Vertical extent, including band bounds and candle wicks.
    #[must_use]
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        match self {
            Self::BollingerBands(series) => min_max(
                (0..series.len())
                    .filter_map(|index| series.bounded_value_at(index))
                    .flat_map(|point| [point.upper, point.lower]),
            ),
            Self::Candlestick(series) => {
                min_max(series.bars().iter().flat_map(|bar| [bar.high, bar.low]))
            }
            Self::MacdHistogram(_) => min_max(self.y_values().into_iter().chain([0.0])),
            _ => min_max(self.y_values()),
        }
    }
}

macro_rules! impl_from_series {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Series {
                fn from(series: $ty) -> Self {
                    Self::$variant(series)
                }
            }
        )*
    };
}

impl_from_series! {
    Price => PriceSeries,
    Sma => SmaSeries,
    Ema => EmaSeries,
    BollingerBands => BollingerBandsSeries,
    MacdLine => MacdLineSeries,
    MacdSignal => MacdSignalSeries,
    MacdHistogram => MacdHistogramSeries,
    LinearRegression => LinearRegressionSeries,
    PolynomialRegression => PolynomialRegressionSeries,
    Annotation => AnnotationSeries,
    Candlestick => CandlestickSeries,
}

/// Splits a series into parallel x and y vectors.
pub(crate) fn unzip_points(series: &Series) -> (Vec<f64>, Vec<f64>) {
    series.points().into_iter().map(|point| (point.x, point.y)).unzip()
}

/// Zips parallel x and y vectors back into points.
pub(crate) fn zip_points(xs: &[f64], ys: &[f64]) -> Vec<DataPoint> {
    xs.iter()
        .zip(ys)
        .map(|(x, y)| DataPoint::new(*x, *y))
        .collect()
}
