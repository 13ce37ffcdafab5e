//! Numeric kernels shared by the derived series.

use crate::error::{ChartError, ChartResult};

/// Mean of `values[max(0, i+1-period) ..= i]` for every `i`.
///
/// Leading indices average the available prefix.
#[must_use]
pub fn windowed_means(values: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    (0..values.len())
        .map(|index| window_mean(&values[(index + 1).saturating_sub(period)..=index]))
        .collect()
}

// Summed per window rather than rolled, so period 1 reproduces the input exactly.
fn window_mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}

/// Mean and population standard deviation over the same windows as
/// `windowed_means`.
#[must_use]
pub fn windowed_mean_std(values: &[f64], period: usize) -> Vec<(f64, f64)> {
    let period = period.max(1);
    (0..values.len())
        .map(|index| {
            let start = (index + 1).saturating_sub(period);
            let window = &values[start..=index];
            let count = window.len() as f64;
            let mean = window_mean(window);
            let variance = window
                .iter()
                .map(|value| (value - mean).powi(2))
                .sum::<f64>()
                / count;
            (mean, variance.sqrt())
        })
        .collect()
}

/// Exponential smoothing seeded with the first value.
#[must_use]
pub fn exponential_smoothing(values: &[f64], sigma: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut previous: Option<f64> = None;
    for value in values {
        let next = match previous {
            None => *value,
            Some(prev) => sigma * value + (1.0 - sigma) * prev,
        };
        out.push(next);
        previous = Some(next);
    }
    out
}

/// Smoothing factor for a period-based EMA.
#[must_use]
pub fn sigma_for_period(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// Least-squares polynomial of fixed degree over equally spaced samples.
///
/// Stored in a discrete orthonormal basis built by Arnoldi iteration on the
/// sample positions (mapped to `[-1, 1]`), so any degree below the sample
/// count stays solvable. `hessenberg[k]` holds the recurrence row that
/// produces basis vector `k + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFit {
    weights: Vec<f64>,
    hessenberg: Vec<Vec<f64>>,
    scale: f64,
}

impl PolynomialFit {
    #[must_use]
    pub fn degree(&self) -> usize {
        self.hessenberg.len()
    }

    /// Value of the fitted polynomial at a normalised position in `[0, 1]`.
    #[must_use]
    pub fn evaluate(&self, position: f64) -> f64 {
        let x = 2.0 * position - 1.0;
        let mut basis = Vec::with_capacity(self.weights.len());
        basis.push(self.scale);
        for (k, row) in self.hessenberg.iter().enumerate() {
            let mut next = x * basis[k];
            for (j, h) in row[..=k].iter().enumerate() {
                next -= h * basis[j];
            }
            basis.push(next / row[k + 1]);
        }
        basis
            .iter()
            .zip(&self.weights)
            .map(|(value, weight)| value * weight)
            .sum()
    }
}

/// Least-squares polynomial fit of `ys` against normalised positions.
///
/// Fails only when `degree >= ys.len()`, where the system has no unique
/// solution.
pub fn polynomial_fit(ys: &[f64], degree: usize) -> ChartResult<PolynomialFit> {
    let n = ys.len();
    if n == 0 {
        return Err(ChartError::EmptySeries(
            "cannot fit a regression over no values".to_owned(),
        ));
    }
    if degree >= n {
        return Err(ChartError::config(format!(
            "regression degree {degree} must be less than the window length {n}"
        )));
    }

    let xs: Vec<f64> = (0..n)
        .map(|index| 2.0 * normalized_position(index, n) - 1.0)
        .collect();
    let scale = 1.0 / (n as f64).sqrt();
    let mut basis: Vec<Vec<f64>> = vec![vec![scale; n]];
    let mut hessenberg: Vec<Vec<f64>> = Vec::with_capacity(degree);

    for k in 0..degree {
        let mut next: Vec<f64> = xs.iter().zip(&basis[k]).map(|(x, q)| x * q).collect();
        let mut row = vec![0.0; k + 2];
        // Two Gram-Schmidt passes keep the basis orthogonal at high degree.
        for _ in 0..2 {
            for (j, q) in basis.iter().enumerate() {
                let projection = dot(q, &next);
                row[j] += projection;
                for (value, q) in next.iter_mut().zip(q) {
                    *value -= projection * q;
                }
            }
        }
        let norm = dot(&next, &next).sqrt();
        if !norm.is_finite() || norm <= f64::EPSILON {
            return Err(ChartError::InvalidData(format!(
                "regression basis is rank deficient at degree {}",
                k + 1
            )));
        }
        row[k + 1] = norm;
        for value in &mut next {
            *value /= norm;
        }
        basis.push(next);
        hessenberg.push(row);
    }

    let weights = basis.iter().map(|q| dot(q, ys)).collect();
    Ok(PolynomialFit {
        weights,
        hessenberg,
        scale,
    })
}

/// Position of `index` within a window of `len` samples, mapped into `[0, 1]`.
#[must_use]
pub fn normalized_position(index: usize, len: usize) -> f64 {
    if len <= 1 {
        return 0.0;
    }
    index as f64 / (len - 1) as f64
}

fn dot(left: &[f64], right: &[f64]) -> f64 {
    left.iter().zip(right).map(|(a, b)| a * b).sum()
}
