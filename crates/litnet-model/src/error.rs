//! Error taxonomy for the analysis pipeline.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Errors raised while preparing, filtering, or mining a record table.
///
/// An empty selection is not an error: it is represented by empty node,
/// edge and rule lists.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A required column is missing from an input table.
    #[error("table '{table}' is missing required columns: {}", .missing.join(", "))]
    Schema { table: String, missing: Vec<String> },

    /// A filter group, network definition, or option references something
    /// that does not exist or is out of range.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// A degenerate statistic (division by zero, logarithm of a non-positive
    /// value) during rule derivation.
    #[error("numeric error in {context}: {message}")]
    Numeric { context: String, message: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl AnalysisError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn numeric(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Numeric {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Returns the error category for structured reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Schema { .. } => ErrorKind::Schema,
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Numeric { .. } => ErrorKind::Numeric,
            Self::DataFrame { .. } => ErrorKind::DataFrame,
        }
    }
}

impl From<polars::prelude::PolarsError> for AnalysisError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Error category exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Schema,
    Configuration,
    Numeric,
    DataFrame,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Schema => "schema",
            Self::Configuration => "configuration",
            Self::Numeric => "numeric",
            Self::DataFrame => "dataframe",
        };
        f.write_str(label)
    }
}

/// Kind plus message, as surfaced to a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&AnalysisError> for ErrorReport {
    fn from(err: &AnalysisError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
