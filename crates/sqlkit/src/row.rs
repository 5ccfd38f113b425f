//! Owned result rows.
//!
//! Clients fully drain their cursors before returning, so rows are plain owned values
//! that outlive the statement that produced them.

use crate::error::{SqlError, SqlResult};
use crate::value::Value;
use std::sync::Arc;

/// Something that selects a column in a [`Row`]: a position or a name.
pub trait ColumnIndex {
    fn index(&self, row: &Row) -> SqlResult<usize>;
}

impl ColumnIndex for usize {
    fn index(&self, row: &Row) -> SqlResult<usize> {
        if *self < row.values.len() {
            Ok(*self)
        } else {
            Err(SqlError::decode(
                self.to_string(),
                format!("index out of range for {} columns", row.values.len()),
            ))
        }
    }
}

impl ColumnIndex for &str {
    fn index(&self, row: &Row) -> SqlResult<usize> {
        row.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(self))
            .ok_or_else(|| SqlError::decode(*self, "no such column"))
    }
}

/// A single result row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    /// Create a row. `columns` is shared between all rows of one result set.
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get<I: ColumnIndex>(&self, idx: I) -> SqlResult<&Value> {
        let i = idx.index(self)?;
        Ok(&self.values[i])
    }

    pub fn is_null<I: ColumnIndex>(&self, idx: I) -> SqlResult<bool> {
        Ok(self.get(idx)?.is_null())
    }

    /// Read a non-null integer.
    pub fn get_i64<I: ColumnIndex>(&self, idx: I) -> SqlResult<i64> {
        let i = idx.index(self)?;
        match &self.values[i] {
            Value::Integer(v) => Ok(*v),
            other => Err(self.mismatch(i, "INTEGER", other)),
        }
    }

    /// Read a nullable integer.
    pub fn get_opt_i64<I: ColumnIndex>(&self, idx: I) -> SqlResult<Option<i64>> {
        let i = idx.index(self)?;
        match &self.values[i] {
            Value::Null => Ok(None),
            Value::Integer(v) => Ok(Some(*v)),
            other => Err(self.mismatch(i, "INTEGER", other)),
        }
    }

    /// Read a non-null string.
    ///
    /// Integers and reals are rendered as text, matching SQLite's own `CAST(x AS TEXT)`
    /// for the common cases.
    pub fn get_string<I: ColumnIndex>(&self, idx: I) -> SqlResult<String> {
        let i = idx.index(self)?;
        match &self.values[i] {
            Value::Text(v) => Ok(v.clone()),
            Value::Integer(v) => Ok(v.to_string()),
            Value::Real(v) => Ok(v.to_string()),
            other => Err(self.mismatch(i, "TEXT", other)),
        }
    }

    /// Read a nullable string.
    pub fn get_opt_string<I: ColumnIndex>(&self, idx: I) -> SqlResult<Option<String>> {
        let i = idx.index(self)?;
        if self.values[i].is_null() {
            return Ok(None);
        }
        self.get_string(i).map(Some)
    }

    /// Read a nullable blob.
    pub fn get_blob<I: ColumnIndex>(&self, idx: I) -> SqlResult<Option<&[u8]>> {
        let i = idx.index(self)?;
        match &self.values[i] {
            Value::Null => Ok(None),
            Value::Blob(v) => Ok(Some(v)),
            other => Err(self.mismatch(i, "BLOB", other)),
        }
    }

    fn mismatch(&self, i: usize, expected: &str, got: &Value) -> SqlError {
        SqlError::decode(
            self.columns.get(i).cloned().unwrap_or_else(|| i.to_string()),
            format!("expected {expected}, got {}", got.type_name()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Row {
        Row::new(
            Arc::from(vec!["id".to_string(), "name".to_string(), "data".to_string()]),
            vec![Value::Integer(3), Value::Text("a".into()), Value::Null],
        )
    }

    #[test]
    fn reads_by_index_and_name() {
        let r = row();
        assert_eq!(r.get_i64(0).unwrap(), 3);
        assert_eq!(r.get_i64("ID").unwrap(), 3);
        assert_eq!(r.get_string("name").unwrap(), "a");
        assert_eq!(r.get_string("id").unwrap(), "3");
    }

    #[test]
    fn nulls() {
        let r = row();
        assert!(r.is_null("data").unwrap());
        assert_eq!(r.get_opt_i64("data").unwrap(), None);
        assert_eq!(r.get_opt_string("data").unwrap(), None);
        assert_eq!(r.get_blob("data").unwrap(), None);
        assert!(r.get_i64("data").is_err());
    }

    #[test]
    fn missing_column_is_decode_error() {
        let r = row();
        assert!(matches!(r.get("nope"), Err(SqlError::Decode { .. })));
        assert!(r.get(9).is_err());
    }
}
