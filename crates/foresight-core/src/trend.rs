//! Linear trend fitting over evenly spaced samples

/// Least-squares slope of `values` against their index (0, 1, 2, ...)
///
/// Returns 0.0 for fewer than two samples.
pub fn slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }

    let n_f = n as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let denominator = n_f * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return 0.0;
    }

    (n_f * sum_xy - sum_x * sum_y) / denominator
}

/// Predict the next value of a percentage-scale series (clamped to 0-100)
pub fn predict_next(values: &[f64]) -> f64 {
    let Some(&last) = values.last() else {
        return 0.0;
    };

    (last + slope(values)).clamp(0.0, 100.0)
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
