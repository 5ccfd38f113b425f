//! Collection membership queries: `column IN (?, ?, ..., ?)`.
//!
//! SQLite caps the number of bound parameters per statement, so large collections are
//! split into several fragments with [`build_collection_query`]. When the caller would
//! rather issue a single statement, [`build_fast_collection_query`] binds the whole
//! collection as one JSON array and expands it with `json_each`.
//!
//! # Example
//! ```ignore
//! use sqlkit::{build_collection_query, CollectionQuery, CollectionOperator};
//!
//! for query in build_collection_query("_id", ids.iter().copied())? {
//!     db.execute(&format!("DELETE FROM message WHERE {}", query.clause()), query.args())?;
//! }
//!
//! let queries = CollectionQuery::new("thread_id")
//!     .prefix("read = 0 AND")
//!     .operator(CollectionOperator::NotIn)
//!     .build(archived)?;
//! ```

use crate::args::{build_args, coerce};
use crate::config::QueryLimits;
use crate::error::{SqlError, SqlResult};
use crate::query::Query;
use crate::value::Arg;

/// Membership operator used by collection queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectionOperator {
    #[default]
    In,
    NotIn,
}

impl CollectionOperator {
    pub fn as_sql(&self) -> &'static str {
        match self {
            CollectionOperator::In => "IN",
            CollectionOperator::NotIn => "NOT IN",
        }
    }
}

/// Builder for chunked collection queries.
#[derive(Debug, Clone)]
#[must_use]
pub struct CollectionQuery {
    column: String,
    prefix: String,
    limits: QueryLimits,
    operator: CollectionOperator,
}

impl CollectionQuery {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            prefix: String::new(),
            limits: QueryLimits::default(),
            operator: CollectionOperator::In,
        }
    }

    /// Raw SQL placed before the column in every fragment, e.g. `"read = 0 AND"`.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn limits(mut self, limits: QueryLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Shorthand for [`CollectionQuery::limits`] with a custom placeholder budget.
    pub fn max_args(self, max_args: usize) -> SqlResult<Self> {
        Ok(self.limits(QueryLimits::new(max_args)?))
    }

    pub fn operator(mut self, operator: CollectionOperator) -> Self {
        self.operator = operator;
        self
    }

    /// Split `values` into fragments of at most `max_args` placeholders each.
    ///
    /// An empty collection yields no fragments. What that means is up to the caller:
    /// no rows can match an `IN`, every row matches a `NOT IN`.
    pub fn build<I, T>(&self, values: I) -> SqlResult<Vec<Query>>
    where
        I: IntoIterator<Item = T>,
        T: Into<Arg>,
    {
        let args = build_args(values)?;
        Ok(args
            .chunks(self.limits.max_args())
            .map(|batch| self.render(batch.to_vec()))
            .collect())
    }

    /// Build exactly one fragment, ignoring the placeholder limit.
    ///
    /// Only use this when the collection is known to be small.
    pub fn build_single<I, T>(&self, values: I) -> SqlResult<Query>
    where
        I: IntoIterator<Item = T>,
        T: Into<Arg>,
    {
        let args = build_args(values)?;
        if args.is_empty() {
            return Err(SqlError::invalid_argument("Must have values!"));
        }
        Ok(self.render(args))
    }

    fn render(&self, args: Vec<String>) -> Query {
        let placeholders = placeholder_list(args.len());
        let clause = format!(
            "{} {} {} ({placeholders})",
            self.prefix,
            self.column,
            self.operator.as_sql()
        );
        Query::new(clause.trim(), args)
    }
}

/// `column IN (...)` fragments, chunked by the default limit of
/// [`MAX_QUERY_ARGS`](crate::MAX_QUERY_ARGS).
pub fn build_collection_query<I, T>(column: &str, values: I) -> SqlResult<Vec<Query>>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    CollectionQuery::new(column).build(values)
}

/// A single `column IN (...)` fragment. Fails if `values` is empty.
pub fn build_single_collection_query<I, T>(column: &str, values: I) -> SqlResult<Query>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    CollectionQuery::new(column).build_single(values)
}

/// A single fragment equivalent to `column IN (...)` with no placeholder limit.
///
/// The collection is bound as one JSON array of strings and expanded with SQLite's
/// `json_each`, which is often faster than a long placeholder list as well.
/// The array is encoded with `serde_json`, so quotes and backslashes in values are escaped.
pub fn build_fast_collection_query<I, T>(column: &str, values: I) -> SqlResult<Query>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    let args = build_args(values)?;
    if args.is_empty() {
        return Err(SqlError::invalid_argument("Must have values!"));
    }
    let json = serde_json::to_string(&args)?;
    Ok(Query::new(
        format!("{column} IN (SELECT e.value FROM json_each(?) e)"),
        vec![json],
    ))
}

/// Repeat a parameterized condition once per argument set, joined with `OR`, in batches
/// that respect `limits`.
///
/// Each inner list of `arg_list` holds the arguments of one copy of `query`, and all
/// of them must have the same length.
///
/// ```ignore
/// let queries = build_custom_collection_query(
///     "thread_id = ? AND date < ?",
///     vec![vec![Arg::from(1), Arg::from(100)], vec![Arg::from(2), Arg::from(200)]],
///     QueryLimits::default(),
/// )?;
/// // "(thread_id = ? AND date < ?) OR (thread_id = ? AND date < ?)"
/// ```
pub fn build_custom_collection_query(
    query: &str,
    arg_list: Vec<Vec<Arg>>,
    limits: QueryLimits,
) -> SqlResult<Vec<Query>> {
    let Some(first) = arg_list.first() else {
        return Ok(Vec::new());
    };
    let width = first.len();
    if arg_list.iter().any(|args| args.len() != width) {
        return Err(SqlError::invalid_argument(
            "All argument sets must have the same length",
        ));
    }
    let batch_size = limits.rows_per_statement(width)?;

    let mut coerced = Vec::with_capacity(arg_list.len());
    for args in arg_list {
        coerced.push(args.into_iter().map(coerce).collect::<SqlResult<Vec<_>>>()?);
    }

    Ok(coerced
        .chunks(batch_size)
        .map(|batch| {
            let clause = vec![format!("({query})"); batch.len()].join(" OR ");
            Query::new(clause, batch.concat())
        })
        .collect())
}

pub(crate) fn placeholder_list(n: usize) -> String {
    let mut s = String::with_capacity(n * 3);
    for i in 0..n {
        if i > 0 {
            s.push_str(", ");
        }
        s.push('?');
    }
    s
}
