//! Normalization and inequality measures
//!
//! Both functions treat non-finite entries as missing, so callers can feed
//! centrality vectors that contain NaN for undefined nodes.

/// Min-max scale values to [0, 1].
///
/// Missing (non-finite) entries are ignored when finding the range and stay
/// NaN in the output. When every finite value is equal, or there are no finite
/// values, the result is a vector of zeros of the same length rather than NaN
/// or 0.5.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let (min, max) = finite_range(values);

    match (min, max) {
        (Some(min), Some(max)) if max > min => {
            let span = max - min;
            values
                .iter()
                .map(|&v| if v.is_finite() { (v - min) / span } else { f64::NAN })
                .collect()
        }
        _ => vec![0.0; values.len()],
    }
}

fn finite_range(values: &[f64]) -> (Option<f64>, Option<f64>) {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((None, None), |(min, max), v| {
            (
                Some(min.map_or(v, |m: f64| m.min(v))),
                Some(max.map_or(v, |m: f64| m.max(v))),
            )
        })
}

/// Replace NaN entries with 0.
pub fn zero_nan(values: Vec<f64>) -> Vec<f64> {
    values
        .into_iter()
        .map(|v| if v.is_nan() { 0.0 } else { v })
        .collect()
}

/// Balance score: 1 minus the Gini coefficient.
///
/// Missing and negative values are dropped first. An empty set scores 0, an
/// all-zero set scores 1 (perfect equality). Otherwise values are sorted
/// ascending and
///
/// ```text
/// G = 2 * sum(i * v_i) / (n * sum(v)) - (n + 1) / n     (i is 1-indexed)
/// ```
///
/// is clamped to [0, 1] before being subtracted from 1.
pub fn gini_balance(values: &[f64]) -> f64 {
    let mut kept: Vec<f64> = values
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .collect();

    if kept.is_empty() {
        return 0.0;
    }

    let total: f64 = kept.iter().sum();
    if total == 0.0 {
        return 1.0;
    }

    kept.sort_by(f64::total_cmp);
    let n = kept.len() as f64;
    let weighted: f64 = kept
        .iter()
        .enumerate()
        .map(|(i, v)| (i + 1) as f64 * v)
        .sum();

    let gini = (2.0 * weighted) / (n * total) - (n + 1.0) / n;
    1.0 - gini.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_maps_extremes_to_unit_interval() {
        let out = normalize(&[2.0, 4.0, 6.0]);
        assert_eq!(out, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_normalize_all_equal_collapses_to_zero() {
        assert_eq!(normalize(&[0.3, 0.3, 0.3, 0.3]), vec![0.0; 4]);
    }

    #[test]
    fn test_normalize_keeps_missing_entries_missing() {
        let out = normalize(&[1.0, f64::NAN, 3.0]);
        assert_eq!(out[0], 0.0);
        assert!(out[1].is_nan());
        assert_eq!(out[2], 1.0);
    }

    #[test]
    fn test_normalize_without_finite_values_is_zero() {
        assert_eq!(normalize(&[f64::NAN, f64::NAN]), vec![0.0, 0.0]);
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn test_zero_nan() {
        assert_eq!(zero_nan(vec![f64::NAN, 0.5]), vec![0.0, 0.5]);
    }

    #[test]
    fn test_gini_balance_equal_values_is_one() {
        assert!((gini_balance(&[0.7, 0.7, 0.7, 0.7]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_gini_balance_conventions() {
        assert_eq!(gini_balance(&[]), 0.0);
        assert_eq!(gini_balance(&[0.0, 0.0, 0.0]), 1.0);
        assert_eq!(gini_balance(&[f64::NAN, -1.0]), 0.0);
        assert_eq!(gini_balance(&[1.0]), 1.0);
    }

    #[test]
    fn test_gini_balance_concentrated_values() {
        // One holder of everything among four: G = 0.75
        let balance = gini_balance(&[0.0, 0.0, 0.0, 1.0]);
        assert!((balance - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_gini_balance_drops_negative_and_missing() {
        let with_noise = gini_balance(&[1.0, -5.0, 3.0, f64::NAN]);
        let clean = gini_balance(&[1.0, 3.0]);
        assert!((with_noise - clean).abs() < 1e-12);
    }
}
