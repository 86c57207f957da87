//! Statistics primitives shared by the aggregators.
//!
//! Every function has an explicit zero-default for degenerate input (empty or
//! single-element slices) so no NaN or Infinity ever reaches a report field.

/// Arithmetic mean; 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median; 0.0 for empty input. Sorts a copy, never mutates the input.
/// Even-length input averages the two middle elements.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Population standard deviation (divide by N, not N−1); 0.0 for fewer than
/// two elements. Pass the mean if already computed to avoid a second pass.
pub fn std_dev(values: &[f64], precomputed_mean: Option<f64>) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = precomputed_mean.unwrap_or_else(|| mean(values));
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Ordinary least-squares slope of `values[i]` against the 0-based index `i`.
/// The caller is responsible for oldest-first chronological ordering.
/// Returns 0.0 for fewer than 2 points or zero x-variance.
pub fn linear_regression_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let x_mean = (nf - 1.0) / 2.0;
    let y_mean = mean(values);

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        sxy += dx * (y - y_mean);
        sxx += dx * dx;
    }
    if sxx == 0.0 {
        return 0.0;
    }
    sxy / sxx
}
