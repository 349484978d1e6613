//! Dynamics analysis: how evenly effort is spread across project domains
//!
//! Each row contributes `weight * salience` to its dimension. Dimensions are
//! keyed by label alone, so a label reused in two domains shares one score.
//! Dimension and domain scores are geometric means rounded to two decimals,
//! and the dynamics score is the Gini balance of the domain scores.

use crate::core::{DynamicsRecord, Frame};
use crate::errors::SchemaError;
use crate::metrics::{geometric_mean, gini_balance, round_to};
use serde::Serialize;
use std::collections::HashMap;

const SCORE_DECIMALS: i32 = 2;

/// Input row enriched with its derived values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DynamicsRow {
    pub domain: String,
    pub dimension: String,
    pub salience: Option<f64>,
    pub weight: Option<f64>,
    pub dimension_value: Option<f64>,
    /// NaN when every value of the dimension is missing
    pub dimension_score: f64,
    pub domain_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainScore {
    pub domain: String,
    pub domain_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DynamicsResult {
    pub rows: Vec<DynamicsRow>,
    /// Domains in first-seen order
    pub domain_table: Vec<DomainScore>,
    pub dynamics_score: f64,
}

impl DynamicsResult {
    pub fn domain_score(&self, domain: &str) -> Option<f64> {
        self.domain_table
            .iter()
            .find(|row| row.domain == domain)
            .map(|row| row.domain_score)
    }

    pub fn dimension_score(&self, dimension: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.dimension == dimension)
            .map(|row| row.dimension_score)
    }
}

/// Convert frame rows and analyze them.
pub fn analyze_dynamics_frame(frame: &Frame) -> Result<DynamicsResult, SchemaError> {
    if frame.is_empty() {
        return Err(SchemaError::EmptyInput);
    }
    analyze_dynamics(&DynamicsRecord::from_frame(frame)?)
}

pub fn analyze_dynamics(records: &[DynamicsRecord]) -> Result<DynamicsResult, SchemaError> {
    if records.is_empty() {
        return Err(SchemaError::EmptyInput);
    }
    validate_ranges(records)?;

    let kept: Vec<(&str, &DynamicsRecord)> = records
        .iter()
        .filter_map(|record| match record.domain.as_deref() {
            Some(domain) if !domain.trim().is_empty() => Some((domain, record)),
            _ => None,
        })
        .collect();

    let dropped = records.len() - kept.len();
    if dropped > 0 {
        log::debug!("Dropped {} dynamics rows without a domain", dropped);
    }
    if kept.is_empty() {
        return Err(SchemaError::NoUsableRows {
            column: "domain".to_string(),
        });
    }

    let values: Vec<Option<f64>> = kept
        .iter()
        .map(|(_, record)| dimension_value(record))
        .collect();

    let dimension_scores = score_dimensions(&kept, &values);
    let (domain_order, domain_scores) = score_domains(&kept, &dimension_scores);

    let rows = kept
        .iter()
        .zip(&values)
        .map(|((domain, record), value)| DynamicsRow {
            domain: domain.to_string(),
            dimension: record.dimension.clone(),
            salience: record.salience,
            weight: record.weight,
            dimension_value: *value,
            dimension_score: dimension_scores[record.dimension.as_str()],
            domain_score: domain_scores[domain],
        })
        .collect();

    let domain_table: Vec<DomainScore> = domain_order
        .iter()
        .map(|domain| DomainScore {
            domain: domain.to_string(),
            domain_score: domain_scores[domain],
        })
        .collect();

    let scores: Vec<f64> = domain_table.iter().map(|row| row.domain_score).collect();

    Ok(DynamicsResult {
        rows,
        domain_table,
        dynamics_score: gini_balance(&scores),
    })
}

fn validate_ranges(records: &[DynamicsRecord]) -> Result<(), SchemaError> {
    for (row, record) in records.iter().enumerate() {
        for (column, value) in [("weight", record.weight), ("salience", record.salience)] {
            if let Some(value) = value {
                if !(value > 0.0 && value <= 1.0) {
                    return Err(SchemaError::out_of_range(column, row, value, "(0, 1]"));
                }
            }
        }
    }
    Ok(())
}

fn dimension_value(record: &DynamicsRecord) -> Option<f64> {
    Some(record.weight? * record.salience?)
}

/// Geometric mean of every value sharing a dimension label, across domains.
fn score_dimensions<'a>(
    kept: &[(&str, &'a DynamicsRecord)],
    values: &[Option<f64>],
) -> HashMap<&'a str, f64> {
    let mut grouped: HashMap<&str, Vec<f64>> = HashMap::new();
    for (&(_, record), value) in kept.iter().zip(values) {
        let entry = grouped.entry(record.dimension.as_str()).or_default();
        if let Some(value) = value {
            entry.push(*value);
        }
    }

    grouped
        .into_iter()
        .map(|(dimension, values)| (dimension, round_to(geometric_mean(&values), SCORE_DECIMALS)))
        .collect()
}

/// Geometric mean of the distinct dimensions of each domain. A NaN dimension
/// score makes the domain score NaN.
fn score_domains<'a>(
    kept: &[(&'a str, &DynamicsRecord)],
    dimension_scores: &HashMap<&str, f64>,
) -> (Vec<&'a str>, HashMap<&'a str, f64>) {
    let mut order: Vec<&str> = Vec::new();
    let mut dimensions: HashMap<&str, Vec<&str>> = HashMap::new();

    for &(domain, record) in kept {
        let entry = dimensions.entry(domain).or_insert_with(|| {
            order.push(domain);
            Vec::new()
        });
        if !entry.contains(&record.dimension.as_str()) {
            entry.push(record.dimension.as_str());
        }
    }

    let scores = dimensions
        .into_iter()
        .map(|(domain, dims)| {
            let values: Vec<f64> = dims.iter().map(|dim| dimension_scores[dim]).collect();
            let score = if values.iter().any(|v| v.is_nan()) {
                f64::NAN
            } else {
                round_to(geometric_mean(&values), SCORE_DECIMALS)
            };
            (domain, score)
        })
        .collect();

    (order, scores)
}
