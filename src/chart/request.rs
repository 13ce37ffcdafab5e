use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::axis::{Axis, ValueFormatter, float_value_formatter, percent_value_formatter};
use crate::chart::{Chart, Timeframe};
use crate::core::palette::default_palette;
use crate::core::{Sample, Style, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, OutputFormat};
use crate::series::{
    AnnotationSeries, BollingerBandsSeries, CandlestickSeries, EmaSeries,
    LinearRegressionSeries, MacdComputation, MacdHistogramSeries, MacdLineSeries, MacdParams,
    MacdSignalSeries, PolynomialRegressionSeries, PriceSeries, Series, SmaSeries, YAxisType,
};

const AREA_FILL_ALPHA: u8 = 64;

/// Declarative chart request: output options, overlay flags and their
/// parameters.
///
/// Every field has a default, so `{}` is a valid JSON request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartRequest {
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
    pub timeframe: Timeframe,
    pub show_axes: bool,
    #[serde(alias = "show_last")]
    pub show_last_value: bool,
    #[serde(alias = "use_legend")]
    pub show_legend: bool,
    pub show_grid: bool,
    #[serde(alias = "use_pct")]
    pub use_percentages: bool,
    #[serde(alias = "use_ma")]
    pub use_sma: bool,
    pub use_ema: bool,
    #[serde(alias = "use_bb")]
    pub use_bollinger: bool,
    pub use_macd: bool,
    pub use_linear_regression: bool,
    pub use_polynomial_regression: bool,
    pub use_candlesticks: bool,
    /// Window for SMA, Bollinger bands and period-derived EMA.
    pub period: usize,
    /// Bollinger band width in standard deviations.
    pub k: f64,
    /// EMA smoothing factor; derived from `period` when absent.
    pub sigma: Option<f64>,
    pub degree: usize,
    pub window: usize,
    /// Regression start index; 0 selects the last `window` samples.
    pub offset: usize,
    pub macd: MacdParams,
    /// Ticker to overlay; samples are supplied to `build`.
    pub compare: Option<String>,
}

impl Default for ChartRequest {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 400,
            format: OutputFormat::Png,
            timeframe: Timeframe::LastTwelveMonths,
            show_axes: true,
            show_last_value: true,
            show_legend: true,
            show_grid: false,
            use_percentages: false,
            use_sma: false,
            use_ema: false,
            use_bollinger: false,
            use_macd: false,
            use_linear_regression: false,
            use_polynomial_regression: false,
            use_candlesticks: false,
            period: 16,
            k: 2.0,
            sigma: None,
            degree: 2,
            window: 32,
            offset: 0,
            macd: MacdParams::default(),
            compare: None,
        }
    }
}

impl ChartRequest {
    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        serde_json::from_str(json)
            .map_err(|err| ChartError::config(format!("malformed chart request: {err}")))
    }

    pub fn to_json_string(&self) -> ChartResult<String> {
        serde_json::to_string(self)
            .map_err(|err| ChartError::config(format!("failed to serialize chart request: {err}")))
    }

    #[must_use]
    pub fn y_value_formatter(&self) -> ValueFormatter {
        if self.use_percentages {
            percent_value_formatter
        } else {
            float_value_formatter
        }
    }

    /// Rejects parameter combinations before any series is built.
    pub fn validate(&self, has_compare: bool) -> ChartResult<()> {
        Viewport::new(self.width, self.height).validate()?;
        let needs_period =
            self.use_sma || self.use_bollinger || (self.use_ema && self.sigma.is_none());
        if self.period == 0 && needs_period {
            return Err(ChartError::config("period must be > 0"));
        }
        if self.use_macd {
            self.macd.validate()?;
            if has_compare && !self.use_percentages {
                return Err(ChartError::config(
                    "macd cannot be combined with a comparison ticker outside percentage mode",
                ));
            }
        }
        if self.use_linear_regression || self.use_polynomial_regression {
            if self.window == 0 {
                return Err(ChartError::config("regression window must be > 0"));
            }
            if self.use_polynomial_regression && self.degree >= self.window {
                return Err(ChartError::config(format!(
                    "polynomial degree {} must be less than window {}",
                    self.degree, self.window
                )));
            }
        }
        if let Some(sigma) = self.sigma {
            if !sigma.is_finite() || sigma <= 0.0 || sigma > 1.0 {
                return Err(ChartError::config(format!(
                    "ema sigma {sigma} must be in (0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Builds the chart for `ticker` and, optionally, a comparison ticker.
    ///
    /// Series order: Bollinger bands, price, comparison, SMA, EMA, MACD
    /// histogram/signal/line, linear then polynomial regression, candlesticks.
    /// With `show_last_value`, every series except MACD and candlesticks is
    /// followed by its last-value annotation.
    pub fn build(
        &self,
        ticker: &str,
        samples: &[Sample],
        compare: Option<(&str, &[Sample])>,
    ) -> ChartResult<Chart> {
        self.validate(compare.is_some())?;
        let palette = default_palette();
        let y_formatter = self.y_value_formatter();
        let legend = self.show_legend;

        let price = self.price_series(ticker, samples, palette.series_stroke(0))?;
        let mut series: Vec<Series> = Vec::new();

        if self.use_bollinger {
            let bands: Series = BollingerBandsSeries::new(price.clone(), self.period, self.k)?.into();
            let bands = bands.with_style(
                Style::default()
                    .with_stroke_color(Color::from_rgb8(0xaa, 0xaa, 0xaa))
                    .with_fill_color(Color::from_rgb8(0xdd, 0xdd, 0xdd).with_alpha(AREA_FILL_ALPHA)),
            );
            let last_value = match (&bands, self.show_last_value) {
                (Series::BollingerBands(inner), true) => Some(
                    AnnotationSeries::bounded_last_value(inner, y_formatter, legend)?,
                ),
                _ => None,
            };
            series.push(bands);
            if let Some(annotation) = last_value {
                series.push(annotation.into());
            }
        }

        let last_value = self.show_last_value.then_some((y_formatter, legend));
        push_with_last_value(&mut series, price.clone(), last_value)?;

        if let Some((compare_ticker, compare_samples)) = compare {
            let y_axis = if self.use_percentages {
                YAxisType::Primary
            } else {
                YAxisType::Secondary
            };
            let compare_series = self
                .price_series(compare_ticker, compare_samples, palette.series_stroke(1))?
                .with_y_axis(y_axis);
            push_with_last_value(&mut series, compare_series, last_value)?;
        }

        if self.use_sma {
            let sma = SmaSeries::new(price.clone(), self.period)?;
            let sma = Series::from(sma).with_style(
                Style::default()
                    .with_stroke_color(palette.series_stroke(2))
                    .with_dash_array(&[5.0, 5.0]),
            );
            push_with_last_value(&mut series, sma, last_value)?;
        }

        if self.use_ema {
            let ema = match self.sigma {
                Some(sigma) => EmaSeries::new(price.clone(), sigma)?,
                None => EmaSeries::with_period(price.clone(), self.period)?,
            };
            let ema = Series::from(ema).with_style(
                Style::default()
                    .with_stroke_color(palette.series_stroke(3))
                    .with_dash_array(&[5.0, 5.0]),
            );
            push_with_last_value(&mut series, ema, last_value)?;
        }

        if self.use_macd {
            let computation = MacdComputation::new(price.clone(), self.macd)?;
            let on_secondary = |series: Series, color: Color| {
                series
                    .with_y_axis(YAxisType::Secondary)
                    .with_style(Style::default().with_stroke_color(color))
            };
            series.push(on_secondary(
                MacdHistogramSeries::from_computation(computation.clone()).into(),
                palette.series_stroke(5).with_alpha(AREA_FILL_ALPHA),
            ));
            series.push(on_secondary(
                MacdSignalSeries::from_computation(computation.clone()).into(),
                palette.series_stroke(2),
            ));
            series.push(on_secondary(
                MacdLineSeries::from_computation(computation).into(),
                palette.series_stroke(4),
            ));
        }

        let regression_offset = if self.offset == 0 {
            price.len().saturating_sub(self.window)
        } else {
            self.offset
        };
        if self.use_linear_regression {
            let linear = LinearRegressionSeries::new(price.clone(), regression_offset, self.window)?;
            let linear = Series::from(linear)
                .with_style(Style::default().with_stroke_color(palette.series_stroke(4)));
            push_with_last_value(&mut series, linear, last_value)?;
        }
        if self.use_polynomial_regression {
            let polynomial = PolynomialRegressionSeries::new(
                price.clone(),
                regression_offset,
                self.window,
                self.degree,
            )?;
            let polynomial = Series::from(polynomial)
                .with_style(Style::default().with_stroke_color(palette.series_stroke(5)));
            push_with_last_value(&mut series, polynomial, last_value)?;
        }

        if self.use_candlesticks {
            let historical: Vec<Sample> = samples
                .iter()
                .filter(|sample| sample.is_historical)
                .copied()
                .collect();
            if historical.is_empty() {
                debug!(ticker, "no historical samples, skipping candlesticks");
            } else {
                series.push(CandlestickSeries::from_samples(ticker, &historical)?.into());
            }
        }

        info!(
            ticker,
            timeframe = %self.timeframe,
            series = series.len(),
            samples = samples.len(),
            "chart request built"
        );

        let axis_style = Style::default().with_show(self.show_axes);
        let grid_style = Style::default().with_show(self.show_grid);
        let secondary_formatter = if self.use_macd {
            float_value_formatter
        } else {
            y_formatter
        };

        Ok(Chart {
            width: self.width,
            height: self.height,
            x_axis: Axis::new(self.timeframe.x_value_formatter())
                .with_style(axis_style.clone())
                .with_grid_style(grid_style.clone()),
            y_axis: Axis::new(y_formatter)
                .with_style(axis_style)
                .with_grid_style(grid_style)
                .with_zero_line(Style::default().with_show(self.use_percentages)),
            y_axis_secondary: Axis::new(secondary_formatter).with_style(
                Style::default().with_show(self.show_axes && !self.use_percentages),
            ),
            series,
            show_legend: legend,
            legend_style: Style::default(),
            timeframe: self.timeframe.class(),
            ..Chart::default()
        })
    }

    fn price_series(&self, ticker: &str, samples: &[Sample], color: Color) -> ChartResult<Series> {
        let mut price = PriceSeries::from_samples(ticker, samples)?;
        if self.use_percentages {
            price = price.with_percent_change()?;
        }
        let fill = if self.show_axes {
            color.with_alpha(AREA_FILL_ALPHA)
        } else {
            Color::TRANSPARENT
        };
        Ok(Series::from(price)
            .with_style(Style::default().with_stroke_color(color).with_fill_color(fill)))
    }
}

fn push_with_last_value(
    series: &mut Vec<Series>,
    item: Series,
    last_value: Option<(ValueFormatter, bool)>,
) -> ChartResult<()> {
    let annotation = match last_value {
        Some((formatter, show_legend)) => {
            Some(AnnotationSeries::last_value(&item, formatter, show_legend)?)
        }
        None => None,
    };
    series.push(item);
    if let Some(annotation) = annotation {
        series.push(annotation.into());
    }
    Ok(())
}
