//! Ordered column → value maps.

use crate::value::Value;

/// Column assignments for one row, kept in insertion order.
///
/// Used as a row for [`BulkInsert`](crate::BulkInsert) and as the proposed assignments
/// for [`build_true_update_query`](crate::build_true_update_query). A column set to
/// [`Value::Null`] and a missing column are both treated as absent by bulk insert.
///
/// # Example
/// ```ignore
/// let row = RowValues::new()
///     .with("thread_id", 4)
///     .with("body", "hello")
///     .with("attachment", vec![0xCA, 0xFE])
///     .with("expires", None::<i64>);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowValues {
    entries: Vec<(String, Value)>,
}

impl RowValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `column`, replacing any previous value while keeping its position.
    pub fn put(&mut self, column: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let column = column.into();
        let value = value.into();
        match self.entries.iter().position(|(c, _)| *c == column) {
            Some(idx) => self.entries[idx].1 = value,
            None => self.entries.push((column, value)),
        }
        self
    }

    /// Consuming counterpart of [`RowValues::put`], convenient for literals.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.put(column, value);
        self
    }

    /// The value for `column`, or `None` if it was never set.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn remove(&mut self, column: &str) -> Option<Value> {
        let idx = self.entries.iter().position(|(c, _)| c == column)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v))
    }
}

impl<C, V> FromIterator<(C, V)> for RowValues
where
    C: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (C, V)>>(iter: I) -> Self {
        let mut values = RowValues::new();
        for (c, v) in iter {
            values.put(c, v);
        }
        values
    }
}
