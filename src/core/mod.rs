//! Input record types shared by the analyzers
//!
//! Each analyzer accepts an ordered slice of typed records. Records are usually
//! produced from a [`Frame`] (rows loaded from JSON or YAML), which is where
//! absent columns and malformed cells are reported as [`SchemaError`]s.

pub mod frame;

pub use frame::Frame;

use crate::errors::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of the partnership produced a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Researcher,
    Partner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Researcher => "researcher",
            Role::Partner => "partner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "researcher" => Ok(Role::Researcher),
            "partner" => Ok(Role::Partner),
            other => Err(other.to_string()),
        }
    }
}

/// One rater's rating of one alignment category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub role: Role,
    pub alignment: String,
    pub rating: Option<f64>,
}

impl RatingRecord {
    pub const COLUMNS: [&'static str; 3] = ["role", "alignment", "rating"];

    pub fn new(role: Role, alignment: impl Into<String>, rating: f64) -> Self {
        Self {
            role,
            alignment: alignment.into(),
            rating: Some(rating),
        }
    }

    /// Convert frame rows, failing on absent columns or unreadable cells.
    pub fn from_frame(frame: &Frame) -> Result<Vec<Self>, SchemaError> {
        frame.require_columns(&Self::COLUMNS)?;

        frame
            .rows()
            .enumerate()
            .map(|(row, cells)| {
                let role_text = frame::text_cell(cells, row, "role")?
                    .ok_or_else(|| SchemaError::invalid_value("role", row, "missing"))?;
                let role = role_text
                    .parse::<Role>()
                    .map_err(|value| SchemaError::invalid_value("role", row, value))?;
                let alignment = frame::text_cell(cells, row, "alignment")?
                    .ok_or_else(|| SchemaError::invalid_value("alignment", row, "missing"))?;
                let rating = frame::number_cell(cells, row, "rating")?;

                Ok(Self {
                    role,
                    alignment,
                    rating,
                })
            })
            .collect()
    }
}

/// Effort assessment for one dimension of one project domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicsRecord {
    pub domain: Option<String>,
    pub dimension: String,
    pub salience: Option<f64>,
    pub weight: Option<f64>,
}

impl DynamicsRecord {
    pub const COLUMNS: [&'static str; 4] = ["domain", "dimension", "salience", "weight"];

    pub fn new(
        domain: impl Into<String>,
        dimension: impl Into<String>,
        salience: f64,
        weight: f64,
    ) -> Self {
        Self {
            domain: Some(domain.into()),
            dimension: dimension.into(),
            salience: Some(salience),
            weight: Some(weight),
        }
    }

    /// Convert frame rows. Range checks happen in the analyzer.
    pub fn from_frame(frame: &Frame) -> Result<Vec<Self>, SchemaError> {
        frame.require_columns(&Self::COLUMNS)?;

        frame
            .rows()
            .enumerate()
            .map(|(row, cells)| {
                Ok(Self {
                    domain: frame::text_cell(cells, row, "domain")?,
                    dimension: frame::text_cell(cells, row, "dimension")?
                        .ok_or_else(|| SchemaError::invalid_value("dimension", row, "missing"))?,
                    salience: frame::number_cell(cells, row, "salience")?,
                    weight: frame::number_cell(cells, row, "weight")?,
                })
            })
            .collect()
    }
}

/// Undirected tie between two people, tagged with its degree of separation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkEdge {
    pub from: String,
    pub to: String,
    pub layer: Option<u32>,
}

impl NetworkEdge {
    pub const COLUMNS: [&'static str; 3] = ["from", "to", "layer"];

    pub fn new(from: impl Into<String>, to: impl Into<String>, layer: u32) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            layer: Some(layer),
        }
    }

    /// Convert frame rows; layers must be whole numbers of at least 1.
    pub fn from_frame(frame: &Frame) -> Result<Vec<Self>, SchemaError> {
        frame.require_columns(&Self::COLUMNS)?;

        frame
            .rows()
            .enumerate()
            .map(|(row, cells)| {
                let from = frame::text_cell(cells, row, "from")?
                    .ok_or_else(|| SchemaError::invalid_value("from", row, "missing"))?;
                let to = frame::text_cell(cells, row, "to")?
                    .ok_or_else(|| SchemaError::invalid_value("to", row, "missing"))?;
                let layer = frame::number_cell(cells, row, "layer")?
                    .map(|value| parse_layer(value, row))
                    .transpose()?;

                Ok(Self { from, to, layer })
            })
            .collect()
    }
}

fn parse_layer(value: f64, row: usize) -> Result<u32, SchemaError> {
    if value.fract() != 0.0 {
        return Err(SchemaError::invalid_value("layer", row, value.to_string()));
    }
    if value < 1.0 || value > u32::MAX as f64 {
        return Err(SchemaError::out_of_range("layer", row, value, "[1, u32::MAX]"));
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_parsing_is_case_insensitive() {
        assert_eq!("Researcher".parse::<Role>(), Ok(Role::Researcher));
        assert_eq!(" PARTNER ".parse::<Role>(), Ok(Role::Partner));
        assert!("funder".parse::<Role>().is_err());
    }

    #[test]
    fn test_rating_records_from_frame() {
        let frame = Frame::from_json(json!([
            {"role": "researcher", "alignment": "Goals", "rating": 0.8},
            {"role": "partner", "alignment": "Goals", "rating": "0.6"},
            {"role": "partner", "alignment": "Values", "rating": null}
        ]))
        .unwrap();

        let records = RatingRecord::from_frame(&frame).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].rating, Some(0.6));
        assert_eq!(records[2].rating, None);
    }

    #[test]
    fn test_unknown_role_is_invalid() {
        let frame = Frame::from_json(json!([
            {"role": "funder", "alignment": "Goals", "rating": 0.8}
        ]))
        .unwrap();

        let err = RatingRecord::from_frame(&frame).unwrap_err();
        assert_eq!(err, SchemaError::invalid_value("role", 0, "funder"));
    }

    #[test]
    fn test_edges_require_whole_positive_layers() {
        let zero = Frame::from_json(json!([{"from": "a", "to": "b", "layer": 0}])).unwrap();
        assert!(matches!(
            NetworkEdge::from_frame(&zero),
            Err(SchemaError::OutOfRange { .. })
        ));

        let fractional = Frame::from_json(json!([{"from": "a", "to": "b", "layer": 1.5}])).unwrap();
        assert!(matches!(
            NetworkEdge::from_frame(&fractional),
            Err(SchemaError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_numeric_node_ids_become_text() {
        let frame = Frame::from_json(json!([{"from": 1, "to": 2, "layer": 2}])).unwrap();
        let edges = NetworkEdge::from_frame(&frame).unwrap();
        assert_eq!(edges, vec![NetworkEdge::new("1", "2", 2)]);
    }

    #[test]
    fn test_dynamics_record_missing_weight_is_none() {
        let frame = Frame::from_json(json!([
            {"domain": "Context", "dimension": "Trust", "salience": 0.5, "weight": "NA"}
        ]))
        .unwrap();

        let records = DynamicsRecord::from_frame(&frame).unwrap();
        assert_eq!(records[0].weight, None);
        assert_eq!(records[0].salience, Some(0.5));
    }
}
