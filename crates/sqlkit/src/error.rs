//! Error types for sqlkit

use thiserror::Error;

/// Result type alias for sqlkit operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Error types for fragment building and database access
#[derive(Debug, Error)]
pub enum SqlError {
    /// A precondition was violated before any SQL was issued
    /// (null argument, empty collection, zero batch size, unusable schema, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// SQLite driver error, propagated unchanged
    #[cfg(feature = "rusqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Query execution error from a non-rusqlite client
    #[error("Query error: {0}")]
    Query(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SqlError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl From<serde_json::Error> for SqlError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
