use tracing::debug;

use crate::core::DataPoint;
use crate::core::math::{PolynomialFit, normalized_position, polynomial_fit};
use crate::error::{ChartError, ChartResult};
use crate::series::{Series, SeriesHeader, unzip_points};

/// Window actually fitted after clamping to the inner series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegressionWindow {
    pub offset: usize,
    pub window: usize,
    pub degree: usize,
}

/// Clamps a requested window against `len` inner values.
///
/// Offset clamps to `len - 1`, window to `len - offset` and degree to
/// `window - 1`. `None` when the inner series is empty.
fn effective_window(len: usize, offset: usize, window: usize, degree: usize) -> Option<RegressionWindow> {
    if len == 0 {
        return None;
    }
    let offset = offset.min(len - 1);
    let window = window.min(len - offset).max(1);
    let degree = degree.min(window - 1);
    Some(RegressionWindow {
        offset,
        window,
        degree,
    })
}

#[derive(Debug, Clone)]
struct Fit {
    window: Option<RegressionWindow>,
    polynomial: Option<PolynomialFit>,
    points: Vec<DataPoint>,
}

fn fit(inner: &Series, offset: usize, window: usize, degree: usize) -> ChartResult<Fit> {
    let Some(effective) = effective_window(inner.len(), offset, window, degree) else {
        return Ok(Fit {
            window: None,
            polynomial: None,
            points: Vec::new(),
        });
    };
    if effective.offset != offset || effective.window != window || effective.degree != degree {
        debug!(
            inner = inner.name(),
            inner_len = inner.len(),
            offset,
            window,
            degree,
            effective_offset = effective.offset,
            effective_window = effective.window,
            effective_degree = effective.degree,
            "regression window clamped to inner series"
        );
    }

    let (xs, ys) = unzip_points(inner);
    let range = effective.offset..effective.offset + effective.window;
    let polynomial = polynomial_fit(&ys[range.clone()], effective.degree)?;
    let points = xs[range]
        .iter()
        .enumerate()
        .map(|(index, x)| {
            let position = normalized_position(index, effective.window);
            DataPoint::new(*x, polynomial.evaluate(position))
        })
        .collect();
    Ok(Fit {
        window: Some(effective),
        polynomial: Some(polynomial),
        points,
    })
}

/// Least-squares line over `inner[offset .. offset + window)`.
#[derive(Debug, Clone)]
pub struct LinearRegressionSeries {
    pub(crate) header: SeriesHeader,
    inner: Box<Series>,
    fit: Fit,
}

impl LinearRegressionSeries {
    pub fn new(inner: Series, offset: usize, window: usize) -> ChartResult<Self> {
        if window == 0 {
            return Err(ChartError::config("linear regression window must be > 0"));
        }
        let fit = fit(&inner, offset, window, 1)?;
        Ok(Self {
            header: SeriesHeader::new(format!("{} - Lin. Reg.", inner.name())),
            inner: Box::new(inner),
            fit,
        })
    }

    #[must_use]
    pub fn inner(&self) -> &Series {
        &self.inner
    }

    /// The fitted window, or `None` for an empty inner series.
    #[must_use]
    pub fn window(&self) -> Option<RegressionWindow> {
        self.fit.window
    }

    /// The fitted line, evaluable at any normalised window position.
    #[must_use]
    pub fn polynomial(&self) -> Option<&PolynomialFit> {
        self.fit.polynomial.as_ref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fit.points.len()
    }

    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<DataPoint> {
        self.fit.points.get(index).copied()
    }
}

/// Least-squares polynomial of `degree` over `inner[offset .. offset + window)`.
#[derive(Debug, Clone)]
pub struct PolynomialRegressionSeries {
    pub(crate) header: SeriesHeader,
    inner: Box<Series>,
    degree: usize,
    fit: Fit,
}

impl PolynomialRegressionSeries {
    pub fn new(inner: Series, offset: usize, window: usize, degree: usize) -> ChartResult<Self> {
        if window == 0 {
            return Err(ChartError::config("polynomial regression window must be > 0"));
        }
        if degree >= window {
            return Err(ChartError::config(format!(
                "polynomial degree {degree} must be less than window {window}"
            )));
        }
        let fit = fit(&inner, offset, window, degree)?;
        Ok(Self {
            header: SeriesHeader::new(format!("{} - Poly. Reg.", inner.name())),
            inner: Box::new(inner),
            degree,
            fit,
        })
    }

    #[must_use]
    pub fn inner(&self) -> &Series {
        &self.inner
    }

    /// Requested degree; see `window()` for the degree actually fitted.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    #[must_use]
    pub fn window(&self) -> Option<RegressionWindow> {
        self.fit.window
    }

    #[must_use]
    pub fn polynomial(&self) -> Option<&PolynomialFit> {
        self.fit.polynomial.as_ref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fit.points.len()
    }

    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<DataPoint> {
        self.fit.points.get(index).copied()
    }
}
