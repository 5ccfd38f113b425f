//! Multi-row INSERT statements.
//!
//! [`BulkInsert`] turns a list of [`RowValues`] into as few
//! `INSERT INTO t (a, b) VALUES (?, ?), (?, ?), ...` statements as the placeholder limit
//! allows.
//!
//! # Example
//! ```ignore
//! use sqlkit::{BulkInsert, OnConflict, RowValues};
//!
//! let rows: Vec<RowValues> = members
//!     .iter()
//!     .map(|m| RowValues::new().with("group_id", group_id).with("recipient_id", m.id))
//!     .collect();
//!
//! for query in BulkInsert::new("group_membership", ["group_id", "recipient_id"])
//!     .on_conflict(OnConflict::Ignore)
//!     .build(&rows)?
//! {
//!     db.execute(query.clause(), query.args())?;
//! }
//! ```

use crate::config::QueryLimits;
use crate::error::{SqlError, SqlResult};
use crate::ident::Ident;
use crate::query::Query;
use crate::value::Value;
use crate::values::RowValues;

/// SQLite conflict resolution for `INSERT OR <action>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnConflict {
    Rollback,
    Abort,
    Fail,
    Ignore,
    Replace,
}

impl OnConflict {
    pub fn as_sql(&self) -> &'static str {
        match self {
            OnConflict::Rollback => "ROLLBACK",
            OnConflict::Abort => "ABORT",
            OnConflict::Fail => "FAIL",
            OnConflict::Ignore => "IGNORE",
            OnConflict::Replace => "REPLACE",
        }
    }
}

/// Batched multi-row INSERT builder.
///
/// Per cell:
/// - blobs are inlined as `X'<HEX>'` literals rather than bound
/// - null or missing values are written as `null`
/// - everything else is a `?` placeholder with its string form bound, in column order
///   within row order
#[derive(Debug, Clone)]
#[must_use]
pub struct BulkInsert {
    table: String,
    columns: Vec<String>,
    limits: QueryLimits,
    on_conflict: Option<OnConflict>,
}

impl BulkInsert {
    pub fn new<I, S>(table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            limits: QueryLimits::default(),
            on_conflict: None,
        }
    }

    pub fn limits(mut self, limits: QueryLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Shorthand for [`BulkInsert::limits`] with a custom placeholder budget.
    pub fn max_args(self, max_args: usize) -> SqlResult<Self> {
        Ok(self.limits(QueryLimits::new(max_args)?))
    }

    pub fn on_conflict(mut self, on_conflict: OnConflict) -> Self {
        self.on_conflict = Some(on_conflict);
        self
    }

    /// Rows per statement: `max_args / columns.len()`.
    ///
    /// Fails if there are no columns or if a single row has more columns than the
    /// placeholder budget.
    pub fn batch_size(&self) -> SqlResult<usize> {
        if self.columns.is_empty() {
            return Err(SqlError::invalid_argument("Must have columns!"));
        }
        self.limits.rows_per_statement(self.columns.len())
    }

    /// Build one statement per batch of rows. No rows yields no statements.
    pub fn build(&self, rows: &[RowValues]) -> SqlResult<Vec<Query>> {
        let batch_size = self.batch_size()?;
        self.check_identifiers()?;
        Ok(rows
            .chunks(batch_size)
            .map(|batch| self.render(batch))
            .collect())
    }

    /// Build a single statement for all `rows`, ignoring the placeholder limit.
    pub fn build_single(&self, rows: &[RowValues]) -> SqlResult<Query> {
        if self.columns.is_empty() {
            return Err(SqlError::invalid_argument("Must have columns!"));
        }
        if rows.is_empty() {
            return Err(SqlError::invalid_argument("Must have rows!"));
        }
        self.check_identifiers()?;
        Ok(self.render(rows))
    }

    // Validated names render back to the same text, so `render` can use them as given.
    fn check_identifiers(&self) -> SqlResult<()> {
        Ident::parse(&self.table)?;
        for column in &self.columns {
            Ident::parse(column)?;
        }
        Ok(())
    }

    fn render(&self, rows: &[RowValues]) -> Query {
        let mut sql = String::from("INSERT");
        if let Some(on_conflict) = self.on_conflict {
            sql.push_str(" OR ");
            sql.push_str(on_conflict.as_sql());
        }
        sql.push_str(" INTO ");
        sql.push_str(&self.table);
        sql.push_str(" (");
        sql.push_str(&self.columns.join(", "));
        sql.push_str(") VALUES ");

        let mut args = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push('(');
            for (j, column) in self.columns.iter().enumerate() {
                if j > 0 {
                    sql.push_str(", ");
                }
                match row.get(column) {
                    None | Some(Value::Null) => sql.push_str("null"),
                    Some(Value::Blob(bytes)) => push_blob_literal(&mut sql, bytes),
                    Some(value) => {
                        sql.push('?');
                        args.push(value.to_string());
                    }
                }
            }
            sql.push(')');
        }

        Query::new(sql, args)
    }
}

/// Append `X'<UPPERHEX>'`.
pub(crate) fn push_blob_literal(sql: &mut String, bytes: &[u8]) {
    sql.push_str("X'");
    sql.push_str(&hex::encode_upper(bytes));
    sql.push('\'');
}

/// Build multi-row INSERT statements with the default placeholder limit.
pub fn build_bulk_insert<I, S>(table: &str, columns: I, rows: &[RowValues]) -> SqlResult<Vec<Query>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    BulkInsert::new(table, columns).build(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(a: impl Into<Value>, b: impl Into<Value>) -> RowValues {
        RowValues::new().with("a", a).with("b", b)
    }

    #[test]
    fn single_row_single_statement() {
        let queries = BulkInsert::new("t", ["a", "b"])
            .max_args(2)
            .unwrap()
            .build(&[row(1, 2)])
            .unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].clause(), "INSERT INTO t (a, b) VALUES (?, ?)");
        assert_eq!(queries[0].args(), ["1", "2"]);
    }

    #[test]
    fn columns_exceeding_budget_fail() {
        let err = BulkInsert::new("t", ["a", "b"])
            .max_args(1)
            .unwrap()
            .build(&[row(1, 2)])
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn no_columns_fail() {
        assert!(BulkInsert::new("t", Vec::<String>::new()).build(&[]).is_err());
    }

    #[test]
    fn invalid_identifiers_fail() {
        let rows = [row(1, 2)];
        let err = BulkInsert::new("t; DROP TABLE t", ["a", "b"])
            .build(&rows)
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(BulkInsert::new("t", ["a", "b) VALUES (1"]).build_single(&rows).is_err());
        assert!(BulkInsert::new(r#""my table""#, ["a", "b"]).build(&rows).is_ok());
    }

    #[test]
    fn no_rows_no_statements() {
        assert!(build_bulk_insert("t", ["a"], &[]).unwrap().is_empty());
    }

    #[test]
    fn batches_by_floor_of_budget() {
        let rows: Vec<RowValues> = (0..7).map(|i| row(i, i * 2)).collect();
        let queries = BulkInsert::new("t", ["a", "b"])
            .max_args(5)
            .unwrap()
            .build(&rows)
            .unwrap();

        // floor(5 / 2) = 2 rows per statement
        assert_eq!(queries.len(), 4);
        assert_eq!(queries[0].clause(), "INSERT INTO t (a, b) VALUES (?, ?), (?, ?)");
        assert_eq!(queries[0].args(), ["0", "0", "1", "2"]);
        assert_eq!(queries[3].clause(), "INSERT INTO t (a, b) VALUES (?, ?)");
        assert_eq!(queries[3].args(), ["6", "12"]);
    }

    #[test]
    fn blobs_inline_and_nulls_literal() {
        let rows = vec![
            row(vec![0xde_u8, 0xad], None::<i64>),
            RowValues::new().with("b", "x"),
        ];
        let queries = build_bulk_insert("t", ["a", "b"], &rows).unwrap();

        assert_eq!(
            queries[0].clause(),
            "INSERT INTO t (a, b) VALUES (X'DEAD', null), (null, ?)"
        );
        assert_eq!(queries[0].args(), ["x"]);
        assert_eq!(queries[0].placeholder_count(), queries[0].args().len());
    }

    #[test]
    fn placeholder_total_counts_bound_values() {
        let rows: Vec<RowValues> = (0..10_i64)
            .map(|i| match i % 3 {
                0 => row(i, vec![i as u8]),
                1 => row(None::<i64>, i),
                _ => row(i, i),
            })
            .collect();
        let queries = BulkInsert::new("t", ["a", "b"])
            .max_args(4)
            .unwrap()
            .build(&rows)
            .unwrap();

        assert_eq!(queries.len(), 5);
        let placeholders: usize = queries.iter().map(Query::placeholder_count).sum();
        let args: usize = queries.iter().map(|q| q.args().len()).sum();
        // rows 0,3,6,9 bind 1; rows 1,4,7 bind 1; rows 2,5,8 bind 2
        assert_eq!(placeholders, 13);
        assert_eq!(args, 13);
    }

    #[test]
    fn on_conflict_applies_to_every_batch() {
        let rows: Vec<RowValues> = (0..3).map(|i| row(i, i)).collect();
        let queries = BulkInsert::new("t", ["a", "b"])
            .max_args(2)
            .unwrap()
            .on_conflict(OnConflict::Replace)
            .build(&rows)
            .unwrap();
        assert_eq!(queries.len(), 3);
        assert!(queries
            .iter()
            .all(|q| q.clause().starts_with("INSERT OR REPLACE INTO t (a, b)")));
    }

    #[test]
    fn build_single_ignores_limit() {
        let rows: Vec<RowValues> = (0..3).map(|i| row(i, i)).collect();
        let q = BulkInsert::new("t", ["a", "b"])
            .max_args(2)
            .unwrap()
            .on_conflict(OnConflict::Ignore)
            .build_single(&rows)
            .unwrap();
        assert_eq!(
            q.clause(),
            "INSERT OR IGNORE INTO t (a, b) VALUES (?, ?), (?, ?), (?, ?)"
        );
        assert!(BulkInsert::new("t", ["a"]).build_single(&[]).is_err());
    }
}
