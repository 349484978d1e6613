//! Small statistical aggregates used by the alignment and dynamics analyzers

/// Geometric mean ignoring missing (NaN) values.
///
/// Missing values are dropped. A zero operand yields 0 (ln 0 = -inf) and a
/// negative operand yields NaN. An empty set yields NaN.
pub fn geometric_mean(values: &[f64]) -> f64 {
    let logs: Vec<f64> = values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .map(f64::ln)
        .collect();

    if logs.is_empty() {
        return f64::NAN;
    }

    (logs.iter().sum::<f64>() / logs.len() as f64).exp()
}

/// Arithmetic mean ignoring NaN entries; NaN when nothing remains.
pub fn mean(values: &[f64]) -> f64 {
    let (sum, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));

    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Round to a fixed number of decimal places, halves to even. NaN passes
/// through.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Interpolated median for grouped (tied) data.
///
/// The plain median `m` is taken from the order statistics at positions
/// floor/ceil of (n + 1) / 2. When more than one observation equals `m`, the
/// median is interpolated inside the class interval of the given `width`
/// centred on `m`:
///
/// ```text
/// m - width / 2 + width * (n / 2 - below) / at
/// ```
///
/// where `below` counts values smaller than `m` and `at` counts values equal
/// to it. Missing values are dropped; an empty input gives NaN.
pub fn interpolated_median(values: &[f64], width: f64) -> f64 {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return f64::NAN;
    }
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let position = (n + 1) as f64 / 2.0;
    let low = sorted[position.floor() as usize - 1];
    let high = sorted[position.ceil() as usize - 1];
    let median = (low + high) / 2.0;

    let below = sorted.iter().filter(|&&v| v < median).count();
    let above = sorted.iter().filter(|&&v| v > median).count();
    let at = n - below - above;

    if at > 1 {
        median - 0.5 * width + width * (n as f64 / 2.0 - below as f64) / at as f64
    } else {
        median
    }
}

/// Smallest non-missing value, NaN when there is none.
pub fn min_finite(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .reduce(f64::min)
        .unwrap_or(f64::NAN)
}

/// Largest non-missing value, NaN when there is none.
pub fn max_finite(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .reduce(f64::max)
        .unwrap_or(f64::NAN)
}
