//! SQLite schema introspection.
//!
//! Thin helpers over `sqlite_master`, `sqlite_sequence` and the `table_info` /
//! `foreign_key_list` / `foreign_key_check` pragmas. Table names that end up in SQL text
//! go through [`IntoIdent`]; everything else is bound.

use crate::client::GenericClient;
use crate::error::{SqlError, SqlResult};
use crate::ident::{Ident, IntoIdent};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One row of `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub cid: i64,
    pub name: String,
    pub decl_type: String,
    pub not_null: bool,
    pub default_value: Option<String>,
    /// 1-based position within the primary key, 0 if not part of it.
    pub primary_key: i64,
}

/// A row that references a parent row which does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyViolation {
    /// The table that declared the REFERENCES clause.
    pub table: String,
    /// Rowid of the offending row. Absent for WITHOUT ROWID tables.
    pub violating_row_id: Option<i64>,
    /// The table that `table` depends on.
    pub depends_on_table: String,
    /// The referencing column, if it could be resolved.
    pub column: Option<String>,
}

fn names_of_type(db: &impl GenericClient, kind: &str) -> SqlResult<Vec<String>> {
    db.query(
        "SELECT name FROM sqlite_master WHERE type = ?",
        &[kind.to_string()],
    )?
    .iter()
    .map(|row| row.get_string(0))
    .collect()
}

fn object_exists(db: &impl GenericClient, kind: &str, name: &str) -> SqlResult<bool> {
    let row = db.query_opt(
        "SELECT name FROM sqlite_master WHERE type = ? AND name = ?",
        &[kind.to_string(), name.to_string()],
    )?;
    Ok(row.is_some())
}

pub fn table_exists(db: &impl GenericClient, table: &str) -> SqlResult<bool> {
    object_exists(db, "table", table)
}

pub fn trigger_exists(db: &impl GenericClient, trigger: &str) -> SqlResult<bool> {
    object_exists(db, "trigger", trigger)
}

pub fn get_all_tables(db: &impl GenericClient) -> SqlResult<Vec<String>> {
    names_of_type(db, "table")
}

pub fn get_all_triggers(db: &impl GenericClient) -> SqlResult<Vec<String>> {
    names_of_type(db, "trigger")
}

/// Number of rows changed since the connection was opened.
///
/// Only meaningful when every statement of interest ran on the same connection.
pub fn get_total_changes(db: &impl GenericClient) -> SqlResult<i64> {
    db.query_scalar_i64("SELECT total_changes()", &[], 0)
}

/// Whether `table` has no rows.
pub fn is_empty(db: &impl GenericClient, table: impl IntoIdent) -> SqlResult<bool> {
    let table = table.into_ident()?;
    let row = db.query_opt(&format!("SELECT COUNT(*) FROM {}", table.to_sql()), &[])?;
    match row {
        Some(row) => Ok(row.get_i64(0)? == 0),
        None => Ok(true),
    }
}

/// List the columns of `table` in declaration order. Unknown tables yield an empty list.
pub fn get_columns(db: &impl GenericClient, table: impl IntoIdent) -> SqlResult<Vec<ColumnInfo>> {
    let table = table.into_ident()?;
    let rows = db.query(&format!("PRAGMA table_info({})", table.to_sql()), &[])?;

    rows.iter()
        .map(|row| {
            Ok(ColumnInfo {
                cid: row.get_i64("cid")?,
                name: row.get_string("name")?,
                decl_type: row.get_opt_string("type")?.unwrap_or_default(),
                not_null: row.get_i64("notnull")? != 0,
                default_value: row.get_opt_string("dflt_value")?,
                primary_key: row.get_i64("pk")?,
            })
        })
        .collect()
}

/// Exact-name check against `PRAGMA table_info`.
pub fn column_exists(
    db: &impl GenericClient,
    table: impl IntoIdent,
    column: &str,
) -> SqlResult<bool> {
    let table = table.into_ident()?;
    let rows = db.query(&format!("PRAGMA table_info({})", table.to_sql()), &[])?;
    for row in &rows {
        if row.get_string("name")? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// The id the next insert into an AUTOINCREMENT table will receive.
///
/// Falls back to `1` for an empty table and to `MAX(_id) + 1` when the table has rows
/// but no `sqlite_sequence` entry.
pub fn get_next_autoincrement_id(db: &impl GenericClient, table: impl IntoIdent) -> SqlResult<i64> {
    let table = table.into_ident()?;

    // sqlite_sequence only exists once some table has been declared AUTOINCREMENT.
    if table_exists(db, "sqlite_sequence")? {
        let seq = db.query_opt(
            "SELECT seq FROM sqlite_sequence WHERE name = ?",
            &[table.name().to_string()],
        )?;
        if let Some(row) = seq {
            return Ok(row.get_i64("seq")? + 1);
        }
    }

    if is_empty(db, &table)? {
        tracing::warn!(table = table.name(), "no entries exist, returning 1");
        return Ok(1);
    }

    if column_exists(db, &table, "_id")? {
        tracing::warn!(
            table = table.name(),
            "table has entries but no autoincrement sequence, using MAX(_id)"
        );
        let current = db.query_scalar_i64(
            &format!("SELECT MAX(_id) FROM {}", table.to_sql()),
            &[],
            0,
        )?;
        return Ok(current + 1);
    }

    tracing::warn!(
        table = table.name(),
        "no autoincrement sequence, non-empty table, no _id column"
    );
    Err(SqlError::invalid_argument(
        "Table must have an auto-incrementing primary key!",
    ))
}

/// Tables that `table` references through foreign keys.
pub fn get_foreign_key_dependencies(
    db: &impl GenericClient,
    table: impl IntoIdent,
) -> SqlResult<BTreeSet<String>> {
    let table = table.into_ident()?;
    db.query(&format!("PRAGMA foreign_key_list({})", table.to_sql()), &[])?
        .iter()
        .map(|row| row.get_string("table"))
        .collect()
}

/// Run `PRAGMA foreign_key_check` over one table, or the whole database when `target`
/// is `None`.
pub fn get_foreign_key_violations(
    db: &impl GenericClient,
    target: Option<&str>,
) -> SqlResult<Vec<ForeignKeyViolation>> {
    let sql = match target {
        Some(t) => format!("PRAGMA foreign_key_check({})", t.into_ident()?.to_sql()),
        None => "PRAGMA foreign_key_check".to_string(),
    };

    db.query(&sql, &[])?
        .iter()
        .map(|row| {
            let table = row.get_string("table")?;
            let fkid = row.get_i64("fkid")?;
            Ok(ForeignKeyViolation {
                column: violation_column(db, &table, fkid),
                violating_row_id: row.get_opt_i64("rowid")?,
                depends_on_table: row.get_string("parent")?,
                table,
            })
        })
        .collect()
}

fn violation_column(db: &impl GenericClient, table: &str, fkid: i64) -> Option<String> {
    let lookup = || -> SqlResult<Option<String>> {
        let table = Ident::quoted(table)?;
        for row in db.query(&format!("PRAGMA foreign_key_list({})", table.to_sql()), &[])? {
            if row.get_i64("id")? == fkid {
                return Ok(Some(row.get_string("from")?));
            }
        }
        Ok(None)
    };

    match lookup() {
        Ok(Some(column)) => Some(column),
        Ok(None) => {
            tracing::warn!(table, fkid, "no foreign key matches violation");
            None
        }
        Err(e) => {
            tracing::warn!(table, fkid, error = %e, "failed to find violation details");
            None
        }
    }
}

/// Forget the AUTOINCREMENT counter of `table`, so ids restart after the current max.
///
/// Only safe when the table's rows are being discarded too. A database without any
/// AUTOINCREMENT table has no counters to reset.
pub fn reset_autoincrement_value(db: &impl GenericClient, table: &str) -> SqlResult<()> {
    if !table_exists(db, "sqlite_sequence")? {
        return Ok(());
    }
    db.execute(
        "DELETE FROM sqlite_sequence WHERE name = ?",
        &[table.to_string()],
    )?;
    Ok(())
}
