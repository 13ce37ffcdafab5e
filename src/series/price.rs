use tracing::trace;

use crate::core::{DataPoint, Sample};
use crate::error::{ChartError, ChartResult};
use crate::series::SeriesHeader;

/// Leaf time series: unix-seconds x values against prices.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    pub(crate) header: SeriesHeader,
    points: Vec<DataPoint>,
}

impl PriceSeries {
    /// Builds a series from samples sorted ascending by timestamp.
    pub fn from_samples(name: impl Into<String>, samples: &[Sample]) -> ChartResult<Self> {
        let name = name.into();
        if samples.is_empty() {
            return Err(ChartError::EmptySeries(format!(
                "price series `{name}` has no samples"
            )));
        }
        let points = samples
            .iter()
            .map(|sample| {
                sample.validate()?;
                Ok(DataPoint::new(sample.unix_seconds(), sample.price))
            })
            .collect::<ChartResult<Vec<_>>>()?;
        trace!(name = %name, count = points.len(), "price series from samples");
        Ok(Self {
            header: SeriesHeader::new(name),
            points,
        })
    }

    /// Builds a series from already-projected points.
    pub fn from_points(name: impl Into<String>, points: Vec<DataPoint>) -> ChartResult<Self> {
        let name = name.into();
        if points.is_empty() {
            return Err(ChartError::EmptySeries(format!(
                "price series `{name}` has no points"
            )));
        }
        if points
            .iter()
            .any(|point| !point.x.is_finite() || !point.y.is_finite())
        {
            return Err(ChartError::InvalidData(format!(
                "price series `{name}` contains non-finite points"
            )));
        }
        Ok(Self {
            header: SeriesHeader::new(name),
            points,
        })
    }

    /// Rewrites values as percent change from the first value.
    ///
    /// `y[i] = (y[i] - y[0]) / y[0] * 100`, so `y[0]` becomes exactly 0.
    pub fn with_percent_change(mut self) -> ChartResult<Self> {
        let base = self.points[0].y;
        if base == 0.0 {
            return Err(ChartError::InvalidData(format!(
                "percent change of `{}` needs a non-zero first price",
                self.header.name
            )));
        }
        for point in &mut self.points {
            point.y = (point.y - base) / base * 100.0;
        }
        Ok(self)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<DataPoint> {
        self.points.get(index).copied()
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }
}
