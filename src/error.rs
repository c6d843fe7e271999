use thiserror::Error;

/// Error type for sqlhelper operations
#[derive(Debug, Error)]
pub enum SqlHelperError {
    #[error("Unsupported dialect: {0}")]
    UnsupportedDialect(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Unsupported database type '{type_name}' for column '{column}'")]
    UnsupportedColumnType { column: String, type_name: String },

    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    #[error("Row {row} has {actual} value(s), expected {expected}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Expected {expected} row(s), got {actual}")]
    UnexpectedRowCount { expected: usize, actual: usize },
}

/// Result type alias for sqlhelper operations
pub type Result<T> = std::result::Result<T, SqlHelperError>;
