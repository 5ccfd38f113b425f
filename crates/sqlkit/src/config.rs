//! Builder limits.

use crate::error::{SqlError, SqlResult};

/// The maximum number of arguments (i.e. `?` placeholders) allowed in a SQL statement.
///
/// Matches SQLite's historical default for `SQLITE_MAX_VARIABLE_NUMBER`.
pub const MAX_QUERY_ARGS: usize = 999;

/// Per-statement limits applied by the batching builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    max_args: usize,
}

impl QueryLimits {
    /// Create limits with a custom placeholder budget. `max_args` must be at least 1.
    pub fn new(max_args: usize) -> SqlResult<Self> {
        if max_args == 0 {
            return Err(SqlError::invalid_argument(
                "max_args must be >= 1, got 0",
            ));
        }
        Ok(Self { max_args })
    }

    /// Maximum number of bound parameters per statement.
    pub fn max_args(&self) -> usize {
        self.max_args
    }

    /// Number of rows of `width` arguments each that fit in one statement.
    ///
    /// Fails when a single row does not fit, or when `width` is 0.
    pub fn rows_per_statement(&self, width: usize) -> SqlResult<usize> {
        if width == 0 {
            return Err(SqlError::invalid_argument("row width must be >= 1"));
        }
        match self.max_args / width {
            0 => Err(SqlError::invalid_argument(format!(
                "{width} arguments per row exceed the limit of {} per statement",
                self.max_args
            ))),
            n => Ok(n),
        }
    }
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            max_args: MAX_QUERY_ARGS,
        }
    }
}
