//! # sqlkit
//!
//! SQL statement construction and schema introspection for SQLite.
//!
//! ## Features
//!
//! - **Argument coercion**: mixed values become the positional string arguments SQLite binds
//! - **Collection queries**: `IN (...)` predicates chunked under the placeholder limit, or a
//!   single `json_each(?)` predicate for any number of values
//! - **Bulk insert**: multi-row `INSERT [OR <action>]` batched by column count
//! - **True updates**: `UPDATE` predicates that only match rows which would actually change
//! - **Fuzzy search**: case- and accent-insensitive `GLOB` patterns
//! - **Schema introspection**: tables, triggers, columns, foreign keys and autoincrement state
//! - **Client-agnostic**: anything implementing [`GenericClient`] works, with a
//!   `rusqlite` implementation behind the default feature
//!
//! ## Example
//!
//! ```ignore
//! use sqlkit::{build_collection_query, build_true_update_query, GenericClient, RowValues};
//!
//! for q in build_collection_query("_id", &ids)? {
//!     db.execute(&format!("DELETE FROM message WHERE {}", q.clause()), q.args())?;
//! }
//!
//! let values = RowValues::new().with("read", 1);
//! let q = build_true_update_query("thread_id = ?", sqlkit::args![thread_id]?, &values)?;
//! ```

pub mod args;
pub mod bulk;
pub mod client;
pub mod collection;
pub mod config;
pub mod error;
pub mod glob;
pub mod ident;
pub mod query;
pub mod row;
pub mod schema;
pub mod update;
pub mod value;
pub mod values;

pub use args::{append_arg, append_args, build_arg, build_args, coerce};
pub use bulk::{BulkInsert, OnConflict, build_bulk_insert};
pub use client::GenericClient;
pub use collection::{
    CollectionOperator, CollectionQuery, build_collection_query, build_custom_collection_query,
    build_fast_collection_query, build_single_collection_query,
};
pub use config::{MAX_QUERY_ARGS, QueryLimits};
pub use error::{SqlError, SqlResult};
pub use glob::{accented_charset, build_case_insensitive_glob_pattern};
pub use ident::{Ident, IntoIdent};
pub use query::{Query, build_query};
pub use row::{ColumnIndex, Row};
pub use schema::{ColumnInfo, ForeignKeyViolation};
pub use update::{build_true_update_query, update_if_changed};
pub use value::{Arg, DatabaseId, Value};
pub use values::RowValues;
