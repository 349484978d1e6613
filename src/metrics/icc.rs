//! Intraclass correlation, two-way model, absolute agreement, single measure
//!
//! Subjects are rows, raters are columns. With n subjects and k raters the
//! two-way ANOVA mean squares give
//!
//! ```text
//! ICC(A,1) = (MSR - MSE) / (MSR + (k - 1) * MSE + k / n * (MSC - MSE))
//! ```
//!
//! Rows with any missing rating are dropped before the decomposition.

use serde::Serialize;
use thiserror::Error;

/// Reasons an ICC cannot be computed for the given ratings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IccError {
    #[error("at least 2 complete subjects are required, found {found}")]
    TooFewSubjects { found: usize },

    #[error("at least 2 raters are required, found {found}")]
    TooFewRaters { found: usize },

    #[error("ratings have inconsistent rater counts")]
    RaggedRatings,

    #[error("coefficient is undefined for these ratings ({value})")]
    Undefined { value: f64 },
}

/// Coefficient together with the ANOVA terms it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IccSummary {
    pub value: f64,
    pub subjects: usize,
    pub raters: usize,
    pub ms_rows: f64,
    pub ms_columns: f64,
    pub ms_error: f64,
}

/// Compute ICC(A,1) over a subjects x raters matrix.
pub fn icc_agreement_single(ratings: &[Vec<f64>]) -> Result<IccSummary, IccError> {
    let raters = ratings.first().map_or(0, Vec::len);
    if ratings.iter().any(|row| row.len() != raters) {
        return Err(IccError::RaggedRatings);
    }
    if raters < 2 {
        return Err(IccError::TooFewRaters { found: raters });
    }

    let complete: Vec<&Vec<f64>> = ratings
        .iter()
        .filter(|row| row.iter().all(|v| v.is_finite()))
        .collect();
    let subjects = complete.len();
    if subjects < 2 {
        return Err(IccError::TooFewSubjects { found: subjects });
    }

    let n = subjects as f64;
    let k = raters as f64;
    let grand_mean = complete.iter().flat_map(|row| row.iter()).sum::<f64>() / (n * k);

    let ss_total: f64 = complete
        .iter()
        .flat_map(|row| row.iter())
        .map(|v| (v - grand_mean).powi(2))
        .sum();

    let ss_rows: f64 = complete
        .iter()
        .map(|row| {
            let row_mean = row.iter().sum::<f64>() / k;
            (row_mean - grand_mean).powi(2)
        })
        .sum::<f64>()
        * k;

    let ss_columns: f64 = (0..raters)
        .map(|j| {
            let column_mean = complete.iter().map(|row| row[j]).sum::<f64>() / n;
            (column_mean - grand_mean).powi(2)
        })
        .sum::<f64>()
        * n;

    let ss_error = ss_total - ss_rows - ss_columns;

    let ms_rows = ss_rows / (n - 1.0);
    let ms_columns = ss_columns / (k - 1.0);
    let ms_error = ss_error / ((n - 1.0) * (k - 1.0));

    let value = (ms_rows - ms_error)
        / (ms_rows + (k - 1.0) * ms_error + k / n * (ms_columns - ms_error));

    if !value.is_finite() {
        return Err(IccError::Undefined { value });
    }

    Ok(IccSummary {
        value,
        subjects,
        raters,
        ms_rows,
        ms_columns,
        ms_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_agreement_is_one() {
        let ratings = vec![vec![0.2, 0.2], vec![0.8, 0.8], vec![0.5, 0.5]];
        let icc = icc_agreement_single(&ratings).unwrap();
        assert!((icc.value - 1.0).abs() < 1e-12);
        assert_eq!(icc.subjects, 3);
        assert_eq!(icc.raters, 2);
    }

    #[test]
    fn test_anti_correlated_ratings_give_negative_coefficient() {
        let ratings = vec![vec![1.0, 0.0], vec![0.0, 0.5]];
        let icc = icc_agreement_single(&ratings).unwrap();
        assert!((icc.value + 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_subject_fails() {
        let err = icc_agreement_single(&[vec![0.4, 0.6]]).unwrap_err();
        assert_eq!(err, IccError::TooFewSubjects { found: 1 });
    }

    #[test]
    fn test_incomplete_rows_are_dropped() {
        let ratings = vec![vec![0.4, f64::NAN], vec![0.1, 0.2], vec![0.9, 0.7]];
        let icc = icc_agreement_single(&ratings).unwrap();
        assert_eq!(icc.subjects, 2);
    }

    #[test]
    fn test_zero_denominator_is_undefined() {
        // Swapped ratings: every row and column mean is 0.5, so MSR = MSC = 0
        // and the denominator reduces to MSE - MSE. No between-subject variance
        // means there is no agreement to measure.
        let ratings = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        assert!(matches!(
            icc_agreement_single(&ratings),
            Err(IccError::Undefined { .. })
        ));
    }

    #[test]
    fn test_single_rater_fails() {
        let err = icc_agreement_single(&[vec![0.4], vec![0.6]]).unwrap_err();
        assert_eq!(err, IccError::TooFewRaters { found: 1 });
    }
}
