use tracing::debug;

use crate::core::math::windowed_mean_std;
use crate::core::{BoundedPoint, DataPoint};
use crate::error::{ChartError, ChartResult};
use crate::series::{Series, SeriesHeader, unzip_points};

/// Bands at `k` population standard deviations around a moving average.
#[derive(Debug, Clone)]
pub struct BollingerBandsSeries {
    pub(crate) header: SeriesHeader,
    inner: Box<Series>,
    period: usize,
    k: f64,
    middle: Vec<DataPoint>,
    bands: Vec<BoundedPoint>,
}

impl BollingerBandsSeries {
    pub fn new(inner: Series, period: usize, k: f64) -> ChartResult<Self> {
        if period == 0 {
            return Err(ChartError::config("bollinger period must be > 0"));
        }
        if !k.is_finite() || k < 0.0 {
            return Err(ChartError::config(format!(
                "bollinger k {k} must be finite and >= 0"
            )));
        }
        if inner.len() < period {
            debug!(
                inner = inner.name(),
                inner_len = inner.len(),
                period,
                "bollinger period exceeds inner series, using partial windows"
            );
        }

        let (xs, ys) = unzip_points(&inner);
        let stats = windowed_mean_std(&ys, period);
        let middle = xs
            .iter()
            .zip(&stats)
            .map(|(x, (mean, _))| DataPoint::new(*x, *mean))
            .collect();
        let bands = xs
            .iter()
            .zip(&stats)
            .map(|(x, (mean, std))| BoundedPoint {
                x: *x,
                upper: mean + k * std,
                lower: mean - k * std,
            })
            .collect();

        Ok(Self {
            header: SeriesHeader::new(format!("{} - Bol. Bands", inner.name())),
            inner: Box::new(inner),
            period,
            k,
            middle,
            bands,
        })
    }

    #[must_use]
    pub fn period(&self) -> usize {
        self.period
    }

    #[must_use]
    pub fn k(&self) -> f64 {
        self.k
    }

    #[must_use]
    pub fn inner(&self) -> &Series {
        &self.inner
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Middle band (the windowed mean).
    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<DataPoint> {
        self.middle.get(index).copied()
    }

    #[must_use]
    pub fn bounded_value_at(&self, index: usize) -> Option<BoundedPoint> {
        self.bands.get(index).copied()
    }

    #[must_use]
    pub fn bounded_last_value(&self) -> Option<BoundedPoint> {
        self.bands.last().copied()
    }
}
