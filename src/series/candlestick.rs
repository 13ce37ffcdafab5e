use crate::core::{DataPoint, OhlcBar, Sample};
use crate::error::{ChartError, ChartResult};
use crate::series::SeriesHeader;

/// OHLC bars drawn as wick plus body.
#[derive(Debug, Clone)]
pub struct CandlestickSeries {
    pub(crate) header: SeriesHeader,
    bars: Vec<OhlcBar>,
}

impl CandlestickSeries {
    /// Validates every sample as an OHLC bar.
    pub fn from_samples(name: impl Into<String>, samples: &[Sample]) -> ChartResult<Self> {
        let name = name.into();
        if samples.is_empty() {
            return Err(ChartError::EmptySeries(format!(
                "candlestick series `{name}` has no samples"
            )));
        }
        let bars = samples
            .iter()
            .map(OhlcBar::from_sample)
            .collect::<ChartResult<Vec<_>>>()?;
        Ok(Self {
            header: SeriesHeader::new(name),
            bars,
        })
    }

    #[must_use]
    pub fn bars(&self) -> &[OhlcBar] {
        &self.bars
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Close price at `index`.
    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<DataPoint> {
        self.bars
            .get(index)
            .map(|bar| DataPoint::new(bar.time, bar.close))
    }
}
