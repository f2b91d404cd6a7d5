//! Public error taxonomy.

use rhp_columnar::ColumnarError;
use std::error::Error as StdError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RhpError {
    /// A cell code does not match the base-symbol + digit-sequence shape.
    #[error("malformed cell code {code:?}: {reason}")]
    MalformedCode { code: String, reason: String },

    /// Resolution is negative, beyond the backend's depth, or finer than the source code for an
    /// ancestor lookup.
    #[error("invalid resolution {resolution}: {reason}")]
    InvalidResolution { resolution: i64, reason: String },

    /// A row lacks a value the operation needs. `row` is `None` when the whole column (or the
    /// cell-code index) is absent.
    #[error(
        "missing {field}{}",
        .row.map(|r| format!(" at row {r}")).unwrap_or_default()
    )]
    MissingField { field: String, row: Option<usize> },

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Table(#[from] ColumnarError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl RhpError {
    pub(crate) fn missing(field: impl Into<String>, row: Option<usize>) -> Self {
        RhpError::MissingField {
            field: field.into(),
            row,
        }
    }

    pub(crate) fn invalid_resolution(
        resolution: impl Into<i64>,
        reason: impl Into<String>,
    ) -> Self {
        RhpError::InvalidResolution {
            resolution: resolution.into(),
            reason: reason.into(),
        }
    }
}

/// A DGGS backend rejected an operation. The original cause is kept as the error source.
#[derive(Debug, Error)]
#[error("backend {operation} failed: {source}")]
pub struct BackendError {
    operation: &'static str,
    #[source]
    source: Box<dyn StdError + Send + Sync + 'static>,
}

impl BackendError {
    pub fn new(
        operation: &'static str,
        source: impl Into<Box<dyn StdError + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// The backend's own error, for downcasting.
    pub fn cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.source.as_ref()
    }
}

/// Result type for accessor operations.
pub type Result<T> = std::result::Result<T, RhpError>;
