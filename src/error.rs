use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Failures that prevent a dataset from being loaded or a dashboard from starting.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to open `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column `{0}`")]
    MissingColumn(String),

    #[error("no `{product}` rows remain after normalization ({rows_read} read, {rows_skipped} skipped)")]
    EmptyDataset {
        product: String,
        rows_read: usize,
        rows_skipped: usize,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Row-level ingest failure. The offending row is skipped, never fatal on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ParseError {
    #[error("missing field `{0}`")]
    MissingField(String),

    #[error("invalid date in `{field}`: `{value}`")]
    InvalidDate { field: String, value: String },

    #[error("survey period ends before it starts ({start} > {end})")]
    InvertedPeriod { start: String, end: String },

    #[error("invalid resale price `{0}`")]
    InvalidPrice(String),

    #[error("negative resale price `{0}`")]
    NegativePrice(String),

    #[error("empty `{0}` value")]
    EmptyCategory(String),
}

/// Categorical selector a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryField {
    Year,
    Region,
    State,
}

impl std::fmt::Display for CategoryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Year => "year",
            Self::Region => "region",
            Self::State => "state",
        };
        f.write_str(name)
    }
}

/// Rejected selection change. The filter state it was applied to is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("unknown {field} `{value}`")]
    UnknownCategory { field: CategoryField, value: String },

    #[error("inverted year range: min={min} > max={max}")]
    InvertedRange { min: i32, max: i32 },

    #[error("year range {min}..={max} is outside dataset bounds {lower}..={upper}")]
    YearOutOfBounds {
        min: i32,
        max: i32,
        lower: i32,
        upper: i32,
    },

    #[error("comparison needs at least {required} distinct states, got {actual}")]
    TooFewStates { required: usize, actual: usize },
}
