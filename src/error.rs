//! Error types for auction-melt
//!
//! Library functions return `Result<T, MeltError>`; the binary wraps these
//! in `anyhow` with file-level context.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeltError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in {path}: {message}")]
    Json { path: PathBuf, message: String },

    #[error("Document has no item list under key '{key}'")]
    MissingItems { key: String },

    #[error("Item #{index} is malformed: {message}")]
    InvalidItem { index: usize, message: String },

    #[error("Item {item}: missing required field '{field}'")]
    MissingField { item: String, field: String },

    #[error("Item {item}: invalid currency in '{field}': {value:?}")]
    InvalidCurrency {
        item: String,
        field: String,
        value: String,
    },

    #[error("Item {item}: invalid timestamp in '{field}': {value:?}")]
    InvalidTimestamp {
        item: String,
        field: String,
        value: String,
    },
}

impl MeltError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MeltError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn missing_field(item: impl Into<String>, field: impl Into<String>) -> Self {
        MeltError::MissingField {
            item: item.into(),
            field: field.into(),
        }
    }

    /// Whether this error is scoped to a single item (and so can be skipped)
    pub fn is_item_error(&self) -> bool {
        matches!(
            self,
            MeltError::InvalidItem { .. }
                | MeltError::MissingField { .. }
                | MeltError::InvalidCurrency { .. }
                | MeltError::InvalidTimestamp { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MeltError>;
