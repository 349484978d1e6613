//! Tabular input: ordered rows of named cells
//!
//! A column counts as present when at least one row carries the key. Cells
//! that are `null`, empty, or `NA` are missing values, not errors.

use crate::errors::SchemaError;
use serde_json::{Map, Value};

pub type Row = Map<String, Value>;

const MISSING_MARKERS: [&str; 3] = ["", "NA", "N/A"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Frame {
    pub fn new(rows: Vec<Row>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for key in rows.iter().flat_map(|row| row.keys()) {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
        Self { columns, rows }
    }

    /// Build a frame from a JSON array of objects.
    pub fn from_json(value: Value) -> Result<Self, SchemaError> {
        let Value::Array(items) = value else {
            return Err(SchemaError::invalid_value(
                "input",
                0,
                "expected a sequence of records",
            ));
        };

        let rows = items
            .into_iter()
            .enumerate()
            .map(|(row, item)| match item {
                Value::Object(cells) => Ok(cells),
                other => Err(SchemaError::invalid_value("record", row, other.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(rows))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Fail with every absent column named at once.
    pub fn require_columns(&self, required: &[&str]) -> Result<(), SchemaError> {
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|column| !self.has_column(column))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::missing_columns(missing))
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn is_missing_marker(text: &str) -> bool {
    MISSING_MARKERS.contains(&text.trim())
}

/// Read a label cell. Numbers are accepted and rendered as text.
pub fn text_cell(cells: &Row, row: usize, column: &str) -> Result<Option<String>, SchemaError> {
    match cells.get(column) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) if is_missing_marker(text) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.trim().to_string())),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(SchemaError::invalid_value(column, row, other.to_string())),
    }
}

/// Read a numeric cell. Numeric strings are parsed; NaN counts as missing.
pub fn number_cell(cells: &Row, row: usize, column: &str) -> Result<Option<f64>, SchemaError> {
    let value = match cells.get(column) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) if is_missing_marker(text) => None,
        Some(Value::String(text)) => Some(
            text.trim()
                .parse::<f64>()
                .map_err(|_| SchemaError::invalid_value(column, row, text.clone()))?,
        ),
        Some(Value::Number(number)) => number.as_f64(),
        Some(other) => return Err(SchemaError::invalid_value(column, row, other.to_string())),
    };

    Ok(value.filter(|v| !v.is_nan()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_columns_are_union_in_first_seen_order() {
        let frame = Frame::from_json(json!([{"a": 1}, {"b": 2, "a": 3}])).unwrap();
        assert_eq!(frame.columns(), ["a".to_string(), "b".to_string()]);
        assert_eq!(frame.len(), 2);
    }

    #[test]
    fn test_require_columns_reports_all_missing() {
        let frame = Frame::from_json(json!([{"role": "partner"}])).unwrap();
        let err = frame
            .require_columns(&["role", "alignment", "rating"])
            .unwrap_err();
        assert_eq!(err, SchemaError::missing_columns(["alignment", "rating"]));
    }

    #[test]
    fn test_empty_frame_has_no_columns() {
        let frame = Frame::from_json(json!([])).unwrap();
        assert!(frame.is_empty());
        assert!(frame.require_columns(&["from"]).is_err());
    }

    #[test]
    fn test_non_array_input_is_rejected() {
        assert!(Frame::from_json(json!({"role": "partner"})).is_err());
        assert!(Frame::from_json(json!([1, 2])).is_err());
    }

    #[test]
    fn test_number_cell_handles_markers_and_strings() {
        let row: Row = serde_json::from_value(json!({
            "a": "NA", "b": " 0.25 ", "c": null, "d": "high", "e": true
        }))
        .unwrap();

        assert_eq!(number_cell(&row, 0, "a"), Ok(None));
        assert_eq!(number_cell(&row, 0, "b"), Ok(Some(0.25)));
        assert_eq!(number_cell(&row, 0, "c"), Ok(None));
        assert_eq!(number_cell(&row, 0, "missing"), Ok(None));
        assert!(number_cell(&row, 0, "d").is_err());
        assert!(number_cell(&row, 0, "e").is_err());
    }

    #[test]
    fn test_text_cell_trims_and_accepts_numbers() {
        let row: Row = serde_json::from_value(json!({"a": "  Trust ", "b": 7, "c": ""})).unwrap();

        assert_eq!(text_cell(&row, 0, "a"), Ok(Some("Trust".to_string())));
        assert_eq!(text_cell(&row, 0, "b"), Ok(Some("7".to_string())));
        assert_eq!(text_cell(&row, 0, "c"), Ok(None));
    }
}
