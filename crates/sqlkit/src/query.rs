//! Query fragments: a condition clause paired with its bound arguments.

use crate::args::build_args;
use crate::error::SqlResult;
use crate::value::Arg;
use std::ops::BitAnd;

/// An immutable `(clause, args)` pair using positional `?` placeholders.
///
/// Every fragment built by this crate has exactly one argument per placeholder.
///
/// # Example
/// ```ignore
/// let q = Query::new("thread_id = ?", vec!["4".into()])
///     .and(build_collection_query("type", [1, 2, 3])?.remove(0));
///
/// assert_eq!(q.clause(), "(thread_id = ?) AND (type IN (?, ?, ?))");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct Query {
    clause: String,
    args: Vec<String>,
}

impl Query {
    /// Create a fragment from a clause and already-coerced arguments.
    pub fn new(clause: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            clause: clause.into(),
            args,
        }
    }

    /// The empty fragment; the identity for [`Query::and`].
    pub fn empty() -> Self {
        Self::default()
    }

    /// The condition clause, without a leading `WHERE`.
    pub fn clause(&self) -> &str {
        &self.clause
    }

    /// Bound arguments, in placeholder order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn is_empty(&self) -> bool {
        self.clause.is_empty()
    }

    /// Split into `(clause, args)`.
    pub fn into_parts(self) -> (String, Vec<String>) {
        (self.clause, self.args)
    }

    /// Number of `?` placeholders in the clause.
    ///
    /// Quoted string literals are skipped, so `'?'` does not count.
    pub fn placeholder_count(&self) -> usize {
        count_placeholders(&self.clause)
    }

    /// Combine two fragments with `AND`.
    ///
    /// If either side is empty the other is returned unchanged, so building a
    /// condition incrementally from `Query::empty()` never yields `() AND (...)`.
    pub fn and(self, other: Query) -> Query {
        match (self.is_empty(), other.is_empty()) {
            (false, false) => {
                let mut args = self.args;
                args.extend(other.args);
                Query {
                    clause: format!("({}) AND ({})", self.clause, other.clause),
                    args,
                }
            }
            (false, true) => self,
            _ => other,
        }
    }
}

impl BitAnd for Query {
    type Output = Query;

    fn bitand(self, rhs: Query) -> Query {
        self.and(rhs)
    }
}

/// Build a fragment from a clause and arguments to be coerced.
///
/// ```ignore
/// let q = build_query("_id = ? AND type = ?", [Arg::from(5), Arg::from("sms")])?;
/// ```
pub fn build_query<I, T>(clause: impl Into<String>, values: I) -> SqlResult<Query>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    Ok(Query::new(clause, build_args(values)?))
}

pub(crate) fn count_placeholders(sql: &str) -> usize {
    let mut count = 0;
    let mut in_literal = false;
    for ch in sql.chars() {
        match ch {
            '\'' => in_literal = !in_literal,
            '?' if !in_literal => count += 1,
            _ => {}
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(clause: &str, args: &[&str]) -> Query {
        Query::new(clause, args.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn and_wraps_both_sides() {
        let out = q("a = ?", &["1"]).and(q("b = ?", &["2"]));
        assert_eq!(out.clause(), "(a = ?) AND (b = ?)");
        assert_eq!(out.args(), ["1", "2"]);
    }

    #[test]
    fn and_with_empty_is_identity() {
        let a = q("a = ?", &["1"]);
        assert_eq!(a.clone().and(Query::empty()), a);
        assert_eq!(Query::empty().and(a.clone()), a);
        assert!(Query::empty().and(Query::empty()).is_empty());
    }

    #[test]
    fn and_operator_matches_method() {
        let a = q("a = ?", &["1"]);
        let b = q("b = ?", &["2"]);
        assert_eq!(a.clone() & b.clone(), a.and(b));
    }

    #[test]
    fn and_is_associative_in_args() {
        let (a, b, c) = (q("a = ?", &["1"]), q("b = ?", &["2"]), q("c = ?", &["3"]));
        let left = (a.clone() & b.clone()) & c.clone();
        let right = a & (b & c);
        assert_eq!(left.args(), right.args());
        assert_eq!(left.placeholder_count(), right.placeholder_count());
    }

    #[test]
    fn placeholder_count_skips_literals() {
        assert_eq!(q("a = ? AND b = '?'", &["1"]).placeholder_count(), 1);
    }

    #[test]
    fn build_query_coerces() {
        let out = build_query("_id = ? AND t = ?", [Arg::from(5), Arg::from("sms")]).unwrap();
        assert_eq!(out.args(), ["5", "sms"]);
        assert!(build_query("_id = ?", [Arg::Null]).is_err());
    }
}
