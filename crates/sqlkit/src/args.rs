//! Argument coercion.
//!
//! Bound arguments are passed to SQLite as text. [`build_args`] is the single coercion
//! point; the rest of this module are thin call-site helpers around it.

use crate::error::{SqlError, SqlResult};
use crate::value::Arg;

/// Coerce a single argument into its bound string form.
///
/// - `Id` uses the identifier's own serialization
/// - `Binary` becomes uppercase hex (matching `hex(col)` in SQLite)
/// - `Null` is rejected
pub fn coerce(arg: Arg) -> SqlResult<String> {
    match arg {
        Arg::Text(v) | Arg::Id(v) => Ok(v),
        Arg::Integer(v) => Ok(v.to_string()),
        Arg::Real(v) => Ok(v.to_string()),
        Arg::Binary(v) => Ok(hex::encode_upper(v)),
        Arg::Null => Err(SqlError::invalid_argument("Cannot have null arg!")),
    }
}

/// Coerce an ordered sequence of arguments into bound string arguments.
///
/// Fails on the first null without returning a partial list.
///
/// # Example
/// ```ignore
/// let args = sqlkit::build_args([Arg::from(1), Arg::from("a")])?;
/// assert_eq!(args, vec!["1", "a"]);
/// ```
pub fn build_args<I, T>(values: I) -> SqlResult<Vec<String>>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    values.into_iter().map(|v| coerce(v.into())).collect()
}

/// Single integer argument; cannot fail.
pub fn build_arg(argument: i64) -> Vec<String> {
    vec![argument.to_string()]
}

/// Return `args` with `addition` appended.
pub fn append_arg(mut args: Vec<String>, addition: impl Into<String>) -> Vec<String> {
    args.push(addition.into());
    args
}

/// Return `args` with the coerced `values` appended.
pub fn append_args<I, T>(mut args: Vec<String>, values: I) -> SqlResult<Vec<String>>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    args.extend(build_args(values)?);
    Ok(args)
}

/// Build bound arguments from heterogeneous values.
///
/// Each value is converted with `Arg::from`, so anything with an `Into<Arg>` impl
/// can be mixed in one call. Evaluates to `SqlResult<Vec<String>>`.
///
/// ```ignore
/// let args = sqlkit::args![thread_id, "sent", Arg::id(&recipient)]?;
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::build_args(::std::vec::Vec::<$crate::Arg>::new())
    };
    ($($value:expr),+ $(,)?) => {
        $crate::build_args([$($crate::Arg::from($value)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::DatabaseId;

    struct MessageId(u32);

    impl DatabaseId for MessageId {
        fn serialize_id(&self) -> String {
            format!("msg-{}", self.0)
        }
    }

    #[test]
    fn coerces_in_order() {
        let args = build_args([Arg::from(1), Arg::from("two"), Arg::from(3.5)]).unwrap();
        assert_eq!(args, vec!["1", "two", "3.5"]);
    }

    #[test]
    fn null_fails_whole_list() {
        let err = build_args([Arg::from(1), Arg::Null, Arg::from(2)]).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn macro_mixes_types() {
        let args = crate::args![7_i64, "x", Arg::id(&MessageId(9)), vec![0x0f_u8]].unwrap();
        assert_eq!(args, vec!["7", "x", "msg-9", "0F"]);
    }

    #[test]
    fn macro_rejects_none() {
        assert!(crate::args![1, None::<i64>].is_err());
        assert!(crate::args![].unwrap().is_empty());
    }

    #[test]
    fn append_helpers() {
        let args = append_arg(build_arg(1), "2");
        assert_eq!(args, vec!["1", "2"]);
        let args = append_args(args, [3, 4]).unwrap();
        assert_eq!(args, vec!["1", "2", "3", "4"]);
        assert!(append_args(args, [None::<i32>]).is_err());
    }
}
