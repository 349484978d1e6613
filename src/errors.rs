//! Shared error types for engagemap
//!
//! Two kinds of failure exist:
//! - [`SchemaError`]: the input is invalid (absent columns, empty input, values
//!   outside their declared range). Raised before any computation begins.
//! - Degenerate statistics (an ICC that cannot be computed, a centrality that is
//!   undefined for the graph): never an error, reported as missing values or as
//!   [`crate::analysis::cascade::Degradation`] entries on the result.

use std::path::PathBuf;
use thiserror::Error;

/// Input validation failures shared by all three analyzers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// One or more required columns are absent from the input
    #[error("missing required column(s): {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// The input contained no rows
    #[error("input is empty")]
    EmptyInput,

    /// Every row was dropped during filtering
    #[error("no usable rows remain after dropping rows without a {column}")]
    NoUsableRows { column: String },

    /// A numeric value lies outside its declared range
    #[error("{column} at row {row} is {value}, expected a value in {expected}")]
    OutOfRange {
        column: String,
        row: usize,
        value: f64,
        expected: &'static str,
    },

    /// A value could not be interpreted for its column
    #[error("invalid {column} at row {row}: {value}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },
}

impl SchemaError {
    pub fn missing_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingColumns {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn out_of_range(
        column: impl Into<String>,
        row: usize,
        value: f64,
        expected: &'static str,
    ) -> Self {
        Self::OutOfRange {
            column: column.into(),
            row,
            value,
            expected,
        }
    }

    pub fn invalid_value(column: impl Into<String>, row: usize, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            column: column.into(),
            row,
            value: value.into(),
        }
    }
}

/// Main error type for engagemap operations
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid analyzer input
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Input file has an extension we cannot read
    #[error("Unsupported input format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl Error {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }

    /// True when the failure is caused by the analyzed data rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Schema(_) | Self::UnsupportedFormat { .. })
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
