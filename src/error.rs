use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalesError {
    #[error("Cannot read sales source '{}': {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SalesError>;

/// Why a single row was left out of the batch results.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("missing required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    #[error("quantity {quantity} and unit_price {unit_price} must both be positive")]
    InvalidValues { quantity: String, unit_price: String },

    #[error("invalid {field} '{value}': {reason}")]
    Parse {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{operation} overflowed the decimal range")]
    Overflow { operation: &'static str },
}

/// Coarse classification of a [`RowError`], used for wording and metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowErrorReason {
    MissingFields,
    InvalidValues,
    ParseFailure,
    ArithmeticOverflow,
}

impl RowErrorReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowErrorReason::MissingFields => "missing_fields",
            RowErrorReason::InvalidValues => "invalid_values",
            RowErrorReason::ParseFailure => "parse_failure",
            RowErrorReason::ArithmeticOverflow => "arithmetic_overflow",
        }
    }
}

impl RowError {
    pub fn reason(&self) -> RowErrorReason {
        match self {
            RowError::MissingFields { .. } => RowErrorReason::MissingFields,
            RowError::InvalidValues { .. } => RowErrorReason::InvalidValues,
            RowError::Parse { .. } => RowErrorReason::ParseFailure,
            RowError::Overflow { .. } => RowErrorReason::ArithmeticOverflow,
        }
    }
}
