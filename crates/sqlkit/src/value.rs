//! Scalar values flowing into and out of SQL.
//!
//! - [`Value`] is a typed SQLite cell: what a row holds and what a [`RowValues`](crate::RowValues)
//!   map assigns to a column.
//! - [`Arg`] is the closed set of things that can be coerced into a bound string argument,
//!   including domain identifiers implementing [`DatabaseId`].

use std::fmt;

/// A domain identifier with its own database serialization.
///
/// Identifiers are bound using [`DatabaseId::serialize_id`] rather than `Display`,
/// so types whose display form differs from their stored form stay correct.
///
/// # Example
/// ```ignore
/// struct RecipientId(i64);
///
/// impl DatabaseId for RecipientId {
///     fn serialize_id(&self) -> String {
///         self.0.to_string()
///     }
/// }
///
/// let args = sqlkit::build_args([Arg::id(&RecipientId(7))])?;
/// ```
pub trait DatabaseId {
    /// The string form stored in the database.
    fn serialize_id(&self) -> String;
}

/// A typed SQLite scalar.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_blob(&self) -> bool {
        matches!(self, Value::Blob(_))
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Real(v) => Some(*v),
            Value::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Value::Blob(v) => Some(v),
            _ => None,
        }
    }

    /// SQLite storage class name, used in decode errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Integer(_) => "INTEGER",
            Value::Real(_) => "REAL",
            Value::Text(_) => "TEXT",
            Value::Blob(_) => "BLOB",
        }
    }
}

/// Blobs display as uppercase hex, everything else as its natural string form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Real(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
            Value::Blob(v) => f.write_str(&hex::encode_upper(v)),
        }
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(val: $t) -> Self {
                    Value::Integer(i64::from(val))
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Value::Integer(i64::from(val))
    }
}

impl From<f32> for Value {
    fn from(val: f32) -> Self {
        Value::Real(f64::from(val))
    }
}

impl From<f64> for Value {
    fn from(val: f64) -> Self {
        Value::Real(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::Text(val.to_string())
    }
}

impl From<String> for Value {
    fn from(val: String) -> Self {
        Value::Text(val)
    }
}

impl From<&String> for Value {
    fn from(val: &String) -> Self {
        Value::Text(val.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(val: Vec<u8>) -> Self {
        Value::Blob(val)
    }
}

impl From<&[u8]> for Value {
    fn from(val: &[u8]) -> Self {
        Value::Blob(val.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(val: Option<T>) -> Self {
        val.map_or(Value::Null, Into::into)
    }
}

/// An argument to be coerced into a bound string parameter.
///
/// See [`build_args`](crate::build_args) for the coercion rules.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Text(String),
    Integer(i64),
    Real(f64),
    Binary(Vec<u8>),
    /// An already-serialized [`DatabaseId`].
    Id(String),
    Null,
}

impl Arg {
    /// Wrap a domain identifier using its own serialization.
    pub fn id<T: DatabaseId + ?Sized>(id: &T) -> Self {
        Arg::Id(id.serialize_id())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Arg::Null)
    }
}

macro_rules! arg_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Arg {
                fn from(val: $t) -> Self {
                    Arg::Integer(i64::from(val))
                }
            }
        )*
    };
}

arg_from_int!(i8, i16, i32, i64, u8, u16, u32);

// Wider unsigned values may not fit an i64; their decimal text is the same bound argument.
impl From<u64> for Arg {
    fn from(val: u64) -> Self {
        Arg::Text(val.to_string())
    }
}

impl From<usize> for Arg {
    fn from(val: usize) -> Self {
        Arg::Text(val.to_string())
    }
}

impl From<bool> for Arg {
    fn from(val: bool) -> Self {
        Arg::Integer(i64::from(val))
    }
}

impl From<f32> for Arg {
    fn from(val: f32) -> Self {
        Arg::Real(f64::from(val))
    }
}

impl From<f64> for Arg {
    fn from(val: f64) -> Self {
        Arg::Real(val)
    }
}

impl From<&str> for Arg {
    fn from(val: &str) -> Self {
        Arg::Text(val.to_string())
    }
}

impl From<String> for Arg {
    fn from(val: String) -> Self {
        Arg::Text(val)
    }
}

impl From<&String> for Arg {
    fn from(val: &String) -> Self {
        Arg::Text(val.clone())
    }
}

impl From<Vec<u8>> for Arg {
    fn from(val: Vec<u8>) -> Self {
        Arg::Binary(val)
    }
}

impl From<&[u8]> for Arg {
    fn from(val: &[u8]) -> Self {
        Arg::Binary(val.to_vec())
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(val: Option<T>) -> Self {
        val.map_or(Arg::Null, Into::into)
    }
}

impl From<Value> for Arg {
    fn from(val: Value) -> Self {
        match val {
            Value::Null => Arg::Null,
            Value::Integer(v) => Arg::Integer(v),
            Value::Real(v) => Arg::Real(v),
            Value::Text(v) => Arg::Text(v),
            Value::Blob(v) => Arg::Binary(v),
        }
    }
}

impl From<&Value> for Arg {
    fn from(val: &Value) -> Self {
        val.clone().into()
    }
}

#[cfg(feature = "uuid")]
impl DatabaseId for uuid::Uuid {
    fn serialize_id(&self) -> String {
        self.hyphenated().to_string()
    }
}

#[cfg(feature = "uuid")]
impl From<uuid::Uuid> for Arg {
    fn from(val: uuid::Uuid) -> Self {
        Arg::id(&val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecipientId(i64);

    impl DatabaseId for RecipientId {
        fn serialize_id(&self) -> String {
            format!("r{}", self.0)
        }
    }

    #[test]
    fn id_uses_own_serialization() {
        assert_eq!(Arg::id(&RecipientId(5)), Arg::Id("r5".to_string()));
    }

    #[test]
    fn option_none_is_null() {
        assert!(Arg::from(None::<i64>).is_null());
        assert!(Value::from(None::<&str>).is_null());
        assert_eq!(Arg::from(Some(3_i32)), Arg::Integer(3));
    }

    #[test]
    fn bool_is_stored_as_integer() {
        assert_eq!(Arg::from(true), Arg::Integer(1));
        assert_eq!(Value::from(false), Value::Integer(0));
    }

    #[test]
    fn blob_displays_as_upper_hex() {
        assert_eq!(Value::Blob(vec![0xab, 0x01]).to_string(), "AB01");
    }

    #[test]
    fn value_converts_to_arg() {
        assert_eq!(Arg::from(Value::Blob(vec![1])), Arg::Binary(vec![1]));
        assert_eq!(Arg::from(&Value::Text("x".into())), Arg::Text("x".into()));
    }
}
