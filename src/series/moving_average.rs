use tracing::debug;

use crate::core::DataPoint;
use crate::core::math::{exponential_smoothing, sigma_for_period, windowed_means};
use crate::error::{ChartError, ChartResult};
use crate::series::{Series, SeriesHeader, unzip_points, zip_points};

/// Simple moving average over a trailing window.
///
/// Leading values average whatever prefix is available.
#[derive(Debug, Clone)]
pub struct SmaSeries {
    pub(crate) header: SeriesHeader,
    inner: Box<Series>,
    period: usize,
    points: Vec<DataPoint>,
}

impl SmaSeries {
    pub fn new(inner: Series, period: usize) -> ChartResult<Self> {
        if period == 0 {
            return Err(ChartError::config("sma period must be > 0"));
        }
        if inner.len() < period {
            debug!(
                inner = inner.name(),
                inner_len = inner.len(),
                period,
                "sma period exceeds inner series, using partial windows"
            );
        }
        let (xs, ys) = unzip_points(&inner);
        let means = windowed_means(&ys, period);
        Ok(Self {
            header: SeriesHeader::new(format!("{} - SMA({period})", inner.name())),
            points: zip_points(&xs, &means),
            inner: Box::new(inner),
            period,
        })
    }

    #[must_use]
    pub fn period(&self) -> usize {
        self.period
    }

    #[must_use]
    pub fn inner(&self) -> &Series {
        &self.inner
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<DataPoint> {
        self.points.get(index).copied()
    }
}

/// Exponential moving average seeded with the first inner value.
#[derive(Debug, Clone)]
pub struct EmaSeries {
    pub(crate) header: SeriesHeader,
    inner: Box<Series>,
    sigma: f64,
    points: Vec<DataPoint>,
}

impl EmaSeries {
    /// `sigma` must lie in `(0, 1]`.
    pub fn new(inner: Series, sigma: f64) -> ChartResult<Self> {
        if !sigma.is_finite() || sigma <= 0.0 || sigma > 1.0 {
            return Err(ChartError::config(format!(
                "ema sigma {sigma} must be in (0, 1]"
            )));
        }
        let (xs, ys) = unzip_points(&inner);
        let smoothed = exponential_smoothing(&ys, sigma);
        Ok(Self {
            header: SeriesHeader::new(format!("{} - EMA", inner.name())),
            points: zip_points(&xs, &smoothed),
            inner: Box::new(inner),
            sigma,
        })
    }

    /// EMA with `sigma = 2 / (period + 1)`.
    pub fn with_period(inner: Series, period: usize) -> ChartResult<Self> {
        if period == 0 {
            return Err(ChartError::config("ema period must be > 0"));
        }
        let mut series = Self::new(inner, sigma_for_period(period))?;
        series.header.name = format!("{} - EMA({period})", series.inner.name());
        Ok(series)
    }

    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    #[must_use]
    pub fn inner(&self) -> &Series {
        &self.inner
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<DataPoint> {
        self.points.get(index).copied()
    }
}
