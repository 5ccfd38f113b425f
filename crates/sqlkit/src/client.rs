//! Generic client trait for database access.
//!
//! Everything in this crate that touches a database goes through [`GenericClient`], so
//! callers can pass a connection, a transaction, or their own wrapper.

use crate::error::SqlResult;
use crate::row::Row;

/// The database capability this crate consumes: run a statement with positional
/// string arguments, and read rows back.
///
/// Implementations must drain and release their cursors before returning.
pub trait GenericClient {
    /// Execute a query and return all rows.
    fn query(&self, sql: &str, args: &[String]) -> SqlResult<Vec<Row>>;

    /// Execute a statement and return the number of affected rows.
    fn execute(&self, sql: &str, args: &[String]) -> SqlResult<usize>;

    /// Execute a query and return the first row, if any.
    ///
    /// Semantics:
    /// - 0 rows: returns `Ok(None)`
    /// - 1 or more rows: returns `Ok(Some(first_row))`
    fn query_opt(&self, sql: &str, args: &[String]) -> SqlResult<Option<Row>> {
        Ok(self.query(sql, args)?.into_iter().next())
    }

    /// Read the first column of the first row as an integer.
    ///
    /// Returns `default` if there is no row or the value is NULL.
    fn query_scalar_i64(&self, sql: &str, args: &[String], default: i64) -> SqlResult<i64> {
        match self.query_opt(sql, args)? {
            Some(row) => Ok(row.get_opt_i64(0)?.unwrap_or(default)),
            None => Ok(default),
        }
    }
}

#[cfg(feature = "rusqlite")]
mod sqlite {
    use super::GenericClient;
    use crate::error::SqlResult;
    use crate::row::Row;
    use crate::value::Value;
    use rusqlite::types::ValueRef;
    use std::sync::Arc;

    fn to_value(value: ValueRef<'_>) -> Value {
        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(v) => Value::Integer(v),
            ValueRef::Real(v) => Value::Real(v),
            ValueRef::Text(v) => Value::Text(String::from_utf8_lossy(v).into_owned()),
            ValueRef::Blob(v) => Value::Blob(v.to_vec()),
        }
    }

    impl GenericClient for rusqlite::Connection {
        fn query(&self, sql: &str, args: &[String]) -> SqlResult<Vec<Row>> {
            tracing::debug!(sql, args = args.len(), "query");

            let mut stmt = self.prepare(sql)?;
            let columns: Arc<[String]> = stmt
                .column_names()
                .into_iter()
                .map(String::from)
                .collect();
            let width = columns.len();

            let mut rows = stmt.query(rusqlite::params_from_iter(args))?;
            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                let mut values = Vec::with_capacity(width);
                for i in 0..width {
                    values.push(to_value(row.get_ref(i)?));
                }
                out.push(Row::new(columns.clone(), values));
            }
            Ok(out)
        }

        fn execute(&self, sql: &str, args: &[String]) -> SqlResult<usize> {
            tracing::debug!(sql, args = args.len(), "execute");

            let mut stmt = self.prepare(sql)?;
            Ok(stmt.execute(rusqlite::params_from_iter(args))?)
        }
    }

    impl GenericClient for rusqlite::Transaction<'_> {
        fn query(&self, sql: &str, args: &[String]) -> SqlResult<Vec<Row>> {
            GenericClient::query(&**self, sql, args)
        }

        fn execute(&self, sql: &str, args: &[String]) -> SqlResult<usize> {
            GenericClient::execute(&**self, sql, args)
        }
    }
}
