//! "True update" predicates.
//!
//! SQLite counts a row as updated whenever it matches the WHERE clause, even if every
//! assigned column already holds its new value. Narrowing the selection to rows where at
//! least one assigned column differs makes the affected-row count mean "rows that
//! actually changed".

use crate::bulk::push_blob_literal;
use crate::client::GenericClient;
use crate::error::{SqlError, SqlResult};
use crate::ident::{Ident, IntoIdent};
use crate::query::Query;
use crate::value::Value;
use crate::values::RowValues;

/// Narrow `selection` to rows that `values` would actually change.
///
/// The result is `(<selection>) AND (<qualifier>)`, where the qualifier has one term per
/// assignment joined by `OR`:
///
/// | proposed value | term                                  | bound arg        |
/// |----------------|---------------------------------------|------------------|
/// | blob           | `hex(col) != ? OR col IS NULL`        | uppercase hex    |
/// | other scalar   | `col != ? OR col IS NULL`             | string form      |
/// | null           | `col NOT NULL`                        | none             |
///
/// `args` are the selection's own arguments and come first. Column names must be valid
/// identifiers; `selection` is raw SQL.
///
/// # Example
/// ```ignore
/// let values = RowValues::new().with("read", 1);
/// let q = build_true_update_query("thread_id = ?", vec!["4".into()], &values)?;
/// assert_eq!(q.clause(), "(thread_id = ?) AND (read != ? OR read IS NULL)");
/// ```
pub fn build_true_update_query(
    selection: &str,
    args: Vec<String>,
    values: &RowValues,
) -> SqlResult<Query> {
    if values.is_empty() {
        return Err(SqlError::invalid_argument(
            "True update needs at least one assignment",
        ));
    }

    let mut qualifier = String::new();
    let mut full_args = args;
    full_args.reserve(values.len());

    for (i, (column, value)) in values.iter().enumerate() {
        let column = Ident::parse(column)?.to_sql();
        if i > 0 {
            qualifier.push_str(" OR ");
        }
        match value {
            Value::Null => {
                qualifier.push_str(&column);
                qualifier.push_str(" NOT NULL");
            }
            Value::Blob(_) => {
                qualifier.push_str(&format!("hex({column}) != ? OR {column} IS NULL"));
                full_args.push(value.to_string());
            }
            _ => {
                qualifier.push_str(&format!("{column} != ? OR {column} IS NULL"));
                full_args.push(value.to_string());
            }
        }
    }

    Ok(Query::new(
        format!("({selection}) AND ({qualifier})"),
        full_args,
    ))
}

/// Run `UPDATE <table> SET ... WHERE <true update predicate>` and return how many rows
/// actually changed.
///
/// Blob assignments are written as `X'..'` literals and nulls as `NULL`, so only scalar
/// values are bound.
pub fn update_if_changed(
    client: &impl GenericClient,
    table: impl IntoIdent,
    values: &RowValues,
    selection: &str,
    args: Vec<String>,
) -> SqlResult<usize> {
    let table = table.into_ident()?;
    let predicate = build_true_update_query(selection, args, values)?;

    let mut sql = format!("UPDATE {} SET ", table.to_sql());
    let mut set_args = Vec::with_capacity(values.len());
    for (i, (column, value)) in values.iter().enumerate() {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push_str(&Ident::parse(column)?.to_sql());
        sql.push_str(" = ");
        match value {
            Value::Null => sql.push_str("NULL"),
            Value::Blob(bytes) => push_blob_literal(&mut sql, bytes),
            _ => {
                sql.push('?');
                set_args.push(value.to_string());
            }
        }
    }
    sql.push_str(" WHERE ");

    let (clause, where_args) = predicate.into_parts();
    sql.push_str(&clause);
    set_args.extend(where_args);

    client.execute(&sql, &set_args)
}
