use crate::types::ColumnType;
use thiserror::Error;

/// Errors from table construction and transformation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ColumnarError {
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("length mismatch for {column}: expected {expected} values, got {actual}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("schema mismatch: expected {expected} values per row, got {actual}")]
    SchemaMismatch { expected: usize, actual: usize },

    #[error("type mismatch for {column}: expected {expected:?}, got {actual}")]
    TypeMismatch {
        column: String,
        expected: ColumnType,
        actual: String,
    },
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, ColumnarError>;
