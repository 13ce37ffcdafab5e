use crate::axis::ValueFormatter;
use crate::chart::Annotation;
use crate::core::{DataPoint, Style};
use crate::error::{ChartError, ChartResult};
use crate::series::{BollingerBandsSeries, Series, SeriesHeader};

/// Discrete labelled points drawn over the chart.
///
/// Annotations never contribute to axis ranges.
#[derive(Debug, Clone)]
pub struct AnnotationSeries {
    pub(crate) header: SeriesHeader,
    annotations: Vec<Annotation>,
}

impl AnnotationSeries {
    #[must_use]
    pub fn new(name: impl Into<String>, annotations: Vec<Annotation>) -> Self {
        Self {
            header: SeriesHeader::new(name),
            annotations,
        }
    }

    /// Labels the last point of `series`.
    ///
    /// With a legend the label is just the formatted value; otherwise it is
    /// prefixed with the series name. Stroke color and axis follow `series`.
    pub fn last_value(
        series: &Series,
        formatter: ValueFormatter,
        show_legend: bool,
    ) -> ChartResult<Self> {
        let last = series.last_value().ok_or_else(|| {
            ChartError::EmptySeries(format!(
                "cannot annotate the last value of empty series `{}`",
                series.name()
            ))
        })?;
        let value = formatter(last.y);
        let label = if show_legend {
            value
        } else {
            format!("{} {value}", series.name())
        };
        let mut annotation = Self::new(
            format!("{} - Last Value", series.name()),
            vec![Annotation::new(last.x, last.y, label)],
        );
        annotation.header.style =
            Style::default().with_stroke_color(series.style().stroke_color);
        annotation.header.y_axis = series.y_axis();
        Ok(annotation)
    }

    /// Labels the last upper and lower band values.
    pub fn bounded_last_value(
        bands: &BollingerBandsSeries,
        formatter: ValueFormatter,
        show_legend: bool,
    ) -> ChartResult<Self> {
        let last = bands.bounded_last_value().ok_or_else(|| {
            ChartError::EmptySeries(format!(
                "cannot annotate the last value of empty series `{}`",
                bands.header.name
            ))
        })?;
        let prefix = if show_legend {
            String::new()
        } else {
            format!("{} ", bands.header.name)
        };
        let k = bands.k();
        let annotations = vec![
            Annotation::new(
                last.x,
                last.upper,
                format!("{prefix}+{k}σ {}", formatter(last.upper)),
            ),
            Annotation::new(
                last.x,
                last.lower,
                format!("{prefix}-{k}σ {}", formatter(last.lower)),
            ),
        ];
        let mut annotation = Self::new(format!("{} - Last Value", bands.header.name), annotations);
        annotation.header.style =
            Style::default().with_stroke_color(bands.header.style.stroke_color);
        annotation.header.y_axis = bands.header.y_axis;
        Ok(annotation)
    }

    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<DataPoint> {
        self.annotations
            .get(index)
            .map(|annotation| DataPoint::new(annotation.x, annotation.y))
    }
}
