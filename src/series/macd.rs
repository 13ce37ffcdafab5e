use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::DataPoint;
use crate::core::math::{exponential_smoothing, sigma_for_period};
use crate::error::{ChartError, ChartResult};
use crate::series::{Series, SeriesHeader, unzip_points};

/// EMA periods of a MACD computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

impl MacdParams {
    pub fn validate(self) -> ChartResult<Self> {
        if self.fast == 0 || self.slow == 0 || self.signal == 0 {
            return Err(ChartError::config(format!(
                "macd periods must be > 0 (fast={}, slow={}, signal={})",
                self.fast, self.slow, self.signal
            )));
        }
        if self.fast >= self.slow {
            return Err(ChartError::config(format!(
                "macd fast period {} must be shorter than slow period {}",
                self.fast, self.slow
            )));
        }
        Ok(self)
    }
}

/// MACD line, signal and histogram computed once and shared by the three
/// series views.
#[derive(Debug)]
pub struct MacdComputation {
    inner: Series,
    params: MacdParams,
    xs: Vec<f64>,
    line: Vec<f64>,
    signal: Vec<f64>,
    histogram: Vec<f64>,
}

impl MacdComputation {
    pub fn new(inner: Series, params: MacdParams) -> ChartResult<Arc<Self>> {
        let params = params.validate()?;
        if inner.len() < params.slow {
            debug!(
                inner = inner.name(),
                inner_len = inner.len(),
                slow = params.slow,
                "macd slow period exceeds inner series"
            );
        }

        let (xs, ys) = unzip_points(&inner);
        let fast = exponential_smoothing(&ys, sigma_for_period(params.fast));
        let slow = exponential_smoothing(&ys, sigma_for_period(params.slow));
        let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = exponential_smoothing(&line, sigma_for_period(params.signal));
        let histogram = line.iter().zip(&signal).map(|(l, s)| l - s).collect();

        Ok(Arc::new(Self {
            inner,
            params,
            xs,
            line,
            signal,
            histogram,
        }))
    }

    #[must_use]
    pub fn params(&self) -> MacdParams {
        self.params
    }

    #[must_use]
    pub fn inner(&self) -> &Series {
        &self.inner
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    #[must_use]
    pub fn line(&self) -> &[f64] {
        &self.line
    }

    #[must_use]
    pub fn signal(&self) -> &[f64] {
        &self.signal
    }

    #[must_use]
    pub fn histogram(&self) -> &[f64] {
        &self.histogram
    }

    fn point(&self, values: &[f64], index: usize) -> Option<DataPoint> {
        Some(DataPoint::new(*self.xs.get(index)?, *values.get(index)?))
    }
}

/// `EMA(fast) - EMA(slow)` of the inner series.
#[derive(Debug, Clone)]
pub struct MacdLineSeries {
    pub(crate) header: SeriesHeader,
    computation: Arc<MacdComputation>,
}

/// EMA of the MACD line.
#[derive(Debug, Clone)]
pub struct MacdSignalSeries {
    pub(crate) header: SeriesHeader,
    computation: Arc<MacdComputation>,
}

/// MACD line minus signal, drawn as bars from zero.
#[derive(Debug, Clone)]
pub struct MacdHistogramSeries {
    pub(crate) header: SeriesHeader,
    computation: Arc<MacdComputation>,
}

impl MacdLineSeries {
    pub fn new(inner: Series, params: MacdParams) -> ChartResult<Self> {
        Ok(Self::from_computation(MacdComputation::new(inner, params)?))
    }

    #[must_use]
    pub fn from_computation(computation: Arc<MacdComputation>) -> Self {
        Self {
            header: SeriesHeader::new(format!("{} - MACD", computation.inner.name())),
            computation,
        }
    }

    #[must_use]
    pub fn computation(&self) -> &Arc<MacdComputation> {
        &self.computation
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.computation.len()
    }

    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<DataPoint> {
        self.computation.point(&self.computation.line, index)
    }
}

impl MacdSignalSeries {
    pub fn new(inner: Series, params: MacdParams) -> ChartResult<Self> {
        Ok(Self::from_computation(MacdComputation::new(inner, params)?))
    }

    #[must_use]
    pub fn from_computation(computation: Arc<MacdComputation>) -> Self {
        Self {
            header: SeriesHeader::new(format!("{} - MACD Signal", computation.inner.name())),
            computation,
        }
    }

    #[must_use]
    pub fn computation(&self) -> &Arc<MacdComputation> {
        &self.computation
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.computation.len()
    }

    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<DataPoint> {
        self.computation.point(&self.computation.signal, index)
    }
}

impl MacdHistogramSeries {
    pub fn new(inner: Series, params: MacdParams) -> ChartResult<Self> {
        Ok(Self::from_computation(MacdComputation::new(inner, params)?))
    }

    #[must_use]
    pub fn from_computation(computation: Arc<MacdComputation>) -> Self {
        Self {
            header: SeriesHeader::new(format!("{} - MACD Hist.", computation.inner.name())),
            computation,
        }
    }

    #[must_use]
    pub fn computation(&self) -> &Arc<MacdComputation> {
        &self.computation
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.computation.len()
    }

    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<DataPoint> {
        self.computation.point(&self.computation.histogram, index)
    }
}
