//! Alignment analysis: how closely researchers and partners rate each category
//!
//! Ratings are grouped by (category, role) and summarised by an interpolated
//! median plus min/max. The two role medians per category are combined into
//! an `overall` geometric mean, and an ICC(A,1) over the median columns gives
//! the alignment score. A failed ICC leaves the score missing; it is never an
//! error.

use crate::config::AlignmentConfig;
use crate::core::{Frame, RatingRecord, Role};
use crate::errors::SchemaError;
use crate::metrics::{
    geometric_mean, icc_agreement_single, interpolated_median, max_finite, min_finite, IccSummary,
};
use serde::Serialize;
use std::collections::HashMap;

/// Row label in the long-form plot data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotRole {
    Researcher,
    Partner,
    Overall,
}

impl From<Role> for PlotRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Researcher => PlotRole::Researcher,
            Role::Partner => PlotRole::Partner,
        }
    }
}

/// Wide summary of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub researcher_median: Option<f64>,
    pub partner_median: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Long-form row: one per (category, role) plus one `overall` per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotRow {
    pub category: String,
    pub role: PlotRole,
    pub rating: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentResult {
    /// Categories in first-seen order
    pub table: Vec<CategorySummary>,
    pub plot_data: Vec<PlotRow>,
    pub icc: Option<IccSummary>,
    pub icc_value: Option<f64>,
    /// Magnitude of the ICC; `None` when the ICC could not be computed
    pub alignment_score: Option<f64>,
}

impl AlignmentResult {
    pub fn category(&self, name: &str) -> Option<&CategorySummary> {
        self.table.iter().find(|row| row.category == name)
    }

    /// The `overall` plot row for a category.
    pub fn overall(&self, name: &str) -> Option<&PlotRow> {
        self.plot_data
            .iter()
            .find(|row| row.role == PlotRole::Overall && row.category == name)
    }
}

#[derive(Debug, Default)]
struct RoleRatings {
    researcher: Option<Vec<f64>>,
    partner: Option<Vec<f64>>,
}

impl RoleRatings {
    fn slot(&mut self, role: Role) -> &mut Vec<f64> {
        match role {
            Role::Researcher => self.researcher.get_or_insert_with(Vec::new),
            Role::Partner => self.partner.get_or_insert_with(Vec::new),
        }
    }

    fn get(&self, role: Role) -> Option<&Vec<f64>> {
        match role {
            Role::Researcher => self.researcher.as_ref(),
            Role::Partner => self.partner.as_ref(),
        }
    }
}

struct GroupSummary {
    median: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn summarize_group(ratings: &[f64], width: f64) -> GroupSummary {
    GroupSummary {
        median: finite(interpolated_median(ratings, width)),
        min: finite(min_finite(ratings)),
        max: finite(max_finite(ratings)),
    }
}

/// Analyze ratings with default parameters.
pub fn analyze_alignment(records: &[RatingRecord]) -> Result<AlignmentResult, SchemaError> {
    analyze_alignment_with(records, &AlignmentConfig::default())
}

/// Convert frame rows and analyze them.
pub fn analyze_alignment_frame(frame: &Frame) -> Result<AlignmentResult, SchemaError> {
    analyze_alignment(&RatingRecord::from_frame(frame)?)
}

pub fn analyze_alignment_with(
    records: &[RatingRecord],
    config: &AlignmentConfig,
) -> Result<AlignmentResult, SchemaError> {
    validate_ratings(records)?;

    let (order, groups) = group_by_category(records);
    let width = config.median_interval_width;

    let mut table = Vec::with_capacity(order.len());
    let mut role_rows = Vec::new();
    let mut overall_rows = Vec::with_capacity(order.len());

    for category in &order {
        let ratings = &groups[category];

        let mut medians = [None, None];
        for (slot, role) in [Role::Researcher, Role::Partner].into_iter().enumerate() {
            if let Some(values) = ratings.get(role) {
                let summary = summarize_group(values, width);
                medians[slot] = summary.median;
                role_rows.push(PlotRow {
                    category: category.clone(),
                    role: role.into(),
                    rating: summary.median,
                    min: summary.min,
                    max: summary.max,
                });
            }
        }

        let all: Vec<f64> = [Role::Researcher, Role::Partner]
            .into_iter()
            .filter_map(|role| ratings.get(role))
            .flatten()
            .copied()
            .collect();
        let min = finite(min_finite(&all));
        let max = finite(max_finite(&all));

        let [researcher_median, partner_median] = medians;
        let available: Vec<f64> = medians.iter().flatten().copied().collect();
        let overall = if available.is_empty() {
            None
        } else {
            finite(geometric_mean(&available))
        };

        overall_rows.push(PlotRow {
            category: category.clone(),
            role: PlotRole::Overall,
            rating: overall,
            min,
            max,
        });

        table.push(CategorySummary {
            category: category.clone(),
            researcher_median,
            partner_median,
            min,
            max,
        });
    }

    let icc = compute_icc(&table);
    let icc_value = icc.as_ref().map(|summary| summary.value);

    role_rows.extend(overall_rows);

    Ok(AlignmentResult {
        table,
        plot_data: role_rows,
        icc,
        icc_value,
        alignment_score: icc_value.map(f64::abs),
    })
}

fn validate_ratings(records: &[RatingRecord]) -> Result<(), SchemaError> {
    for (row, record) in records.iter().enumerate() {
        if let Some(rating) = record.rating {
            if !(0.0..=1.0).contains(&rating) {
                return Err(SchemaError::out_of_range("rating", row, rating, "[0, 1]"));
            }
        }
    }
    Ok(())
}

fn group_by_category(records: &[RatingRecord]) -> (Vec<String>, HashMap<String, RoleRatings>) {
    let mut order = Vec::new();
    let mut groups: HashMap<String, RoleRatings> = HashMap::new();

    for record in records {
        let entry = groups.entry(record.alignment.clone()).or_insert_with(|| {
            order.push(record.alignment.clone());
            RoleRatings::default()
        });
        let slot = entry.slot(record.role);
        if let Some(rating) = record.rating {
            slot.push(rating);
        }
    }

    (order, groups)
}

fn compute_icc(table: &[CategorySummary]) -> Option<IccSummary> {
    let matrix: Vec<Vec<f64>> = table
        .iter()
        .map(|row| {
            vec![
                row.researcher_median.unwrap_or(f64::NAN),
                row.partner_median.unwrap_or(f64::NAN),
            ]
        })
        .collect();

    match icc_agreement_single(&matrix) {
        Ok(summary) => Some(summary),
        Err(e) => {
            log::debug!("ICC could not be computed: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(role: Role, category: &str, value: f64) -> RatingRecord {
        RatingRecord::new(role, category, value)
    }

    #[test]
    fn test_single_category_opposite_ratings() {
        let records = vec![
            rating(Role::Researcher, "Goals", 1.0),
            rating(Role::Researcher, "Goals", 1.0),
            rating(Role::Partner, "Goals", 0.0),
            rating(Role::Partner, "Goals", 0.0),
        ];

        let result = analyze_alignment(&records).unwrap();
        let goals = result.category("Goals").unwrap();
        assert_eq!(goals.researcher_median, Some(1.0));
        assert_eq!(goals.partner_median, Some(0.0));
        assert_eq!(goals.min, Some(0.0));
        assert_eq!(goals.max, Some(1.0));
        assert_eq!(result.overall("Goals").unwrap().rating, Some(0.0));
        assert_eq!(result.alignment_score, None);
    }

    #[test]
    fn test_missing_role_uses_available_median() {
        let records = vec![
            rating(Role::Researcher, "Trust", 0.4),
            rating(Role::Researcher, "Trust", 0.6),
        ];

        let result = analyze_alignment(&records).unwrap();
        let trust = result.category("Trust").unwrap();
        assert_eq!(trust.partner_median, None);
        let overall = result.overall("Trust").unwrap().rating.unwrap();
        assert!((overall - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_plot_data_lists_role_rows_before_overall_rows() {
        let records = vec![
            rating(Role::Partner, "A", 0.2),
            rating(Role::Researcher, "A", 0.3),
            rating(Role::Researcher, "B", 0.9),
        ];

        let result = analyze_alignment(&records).unwrap();
        let roles: Vec<(&str, PlotRole)> = result
            .plot_data
            .iter()
            .map(|row| (row.category.as_str(), row.role))
            .collect();

        assert_eq!(
            roles,
            vec![
                ("A", PlotRole::Researcher),
                ("A", PlotRole::Partner),
                ("B", PlotRole::Researcher),
                ("A", PlotRole::Overall),
                ("B", PlotRole::Overall),
            ]
        );
    }

    #[test]
    fn test_anti_correlated_categories_have_defined_score() {
        let records = vec![
            rating(Role::Researcher, "A", 1.0),
            rating(Role::Partner, "A", 0.0),
            rating(Role::Researcher, "B", 0.0),
            rating(Role::Partner, "B", 0.5),
        ];

        let result = analyze_alignment(&records).unwrap();
        let icc = result.icc_value.unwrap();
        assert!(icc < 0.0);
        assert_eq!(result.alignment_score, Some(icc.abs()));
    }

    #[test]
    fn test_rating_out_of_range_is_schema_error() {
        let records = vec![rating(Role::Partner, "A", 1.2)];
        assert!(matches!(
            analyze_alignment(&records),
            Err(SchemaError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_missing_ratings_are_ignored() {
        let records = vec![
            RatingRecord {
                role: Role::Partner,
                alignment: "A".to_string(),
                rating: None,
            },
            rating(Role::Partner, "A", 0.3),
        ];

        let result = analyze_alignment(&records).unwrap();
        assert_eq!(result.category("A").unwrap().partner_median, Some(0.3));
    }

    #[test]
    fn test_empty_input_yields_empty_result() {
        let result = analyze_alignment(&[]).unwrap();
        assert!(result.table.is_empty());
        assert!(result.plot_data.is_empty());
        assert_eq!(result.icc_value, None);
    }
}
