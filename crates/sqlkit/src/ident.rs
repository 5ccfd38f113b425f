//! Safe SQL identifier handling.
//!
//! Table and column names cannot be bound as parameters (`PRAGMA table_info(?)` is not
//! valid SQLite), so they are validated here before being interpolated into SQL text.
//!
//! - Unquoted names start with `_` or a letter, followed by letters, digits, `_` or `$`.
//!   Letters and digits may be any Unicode alphanumerics, as SQLite accepts them bare.
//! - Quoted names (`"my table"`) allow any characters except NUL and escape `"` as `""`
//!
//! # Example
//! ```ignore
//! use sqlkit::Ident;
//!
//! let t = Ident::parse("message")?;
//! let c = Ident::parse(r#""Group Members""#)?;
//! # Ok::<(), sqlkit::SqlError>(())
//! ```

use crate::error::{SqlError, SqlResult};

/// A validated SQLite identifier (table, column or trigger name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    name: String,
    quoted: bool,
}

impl Ident {
    /// Create a quoted identifier from a raw name.
    pub fn quoted(name: &str) -> SqlResult<Self> {
        if name.is_empty() {
            return Err(SqlError::invalid_argument("Empty quoted identifier"));
        }
        if name.contains('\0') {
            return Err(SqlError::invalid_argument(
                "Identifier cannot contain NUL character",
            ));
        }
        Ok(Self {
            name: name.to_string(),
            quoted: true,
        })
    }

    /// Parse an identifier: either a bare name or a `"quoted"` one.
    pub fn parse(s: &str) -> SqlResult<Self> {
        if s.is_empty() {
            return Err(SqlError::invalid_argument("Identifier cannot be empty"));
        }
        if s.contains('\0') {
            return Err(SqlError::invalid_argument(
                "Identifier cannot contain NUL character",
            ));
        }

        if let Some(rest) = s.strip_prefix('"') {
            let mut name = String::new();
            let mut chars = rest.chars().peekable();
            loop {
                match chars.next() {
                    Some('"') => {
                        // Escaped quote: ""
                        if chars.peek() == Some(&'"') {
                            chars.next();
                            name.push('"');
                        } else {
                            break;
                        }
                    }
                    Some(c) => name.push(c),
                    None => return Err(SqlError::invalid_argument("Unclosed quoted identifier")),
                }
            }
            if let Some(c) = chars.next() {
                return Err(SqlError::invalid_argument(format!(
                    "Unexpected '{c}' after quoted identifier"
                )));
            }
            return Self::quoted(&name);
        }

        let mut chars = s.chars();
        let first_ok = chars
            .next()
            .is_some_and(|c| c == '_' || c.is_alphabetic());
        if !first_ok {
            return Err(SqlError::invalid_argument(format!(
                "Invalid identifier start character in '{s}'"
            )));
        }
        if let Some(c) = chars.find(|&c| !(c == '_' || c == '$' || c.is_alphanumeric())) {
            return Err(SqlError::invalid_argument(format!(
                "Invalid character in identifier '{s}': '{c}'"
            )));
        }

        Ok(Self {
            name: s.to_string(),
            quoted: false,
        })
    }

    /// The raw, unescaped name, as stored in `sqlite_master` and `sqlite_sequence`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the identifier as SQL.
    pub fn to_sql(&self) -> String {
        if !self.quoted {
            return self.name.clone();
        }
        let mut out = String::with_capacity(self.name.len() + 2);
        out.push('"');
        for ch in self.name.chars() {
            if ch == '"' {
                out.push_str("\"\"");
            } else {
                out.push(ch);
            }
        }
        out.push('"');
        out
    }
}

/// Convert an input into an [`Ident`].
///
/// This is mainly for ergonomics in introspection APIs.
pub trait IntoIdent {
    fn into_ident(self) -> SqlResult<Ident>;
}

impl IntoIdent for Ident {
    fn into_ident(self) -> SqlResult<Ident> {
        Ok(self)
    }
}

impl IntoIdent for &Ident {
    fn into_ident(self) -> SqlResult<Ident> {
        Ok(self.clone())
    }
}

impl IntoIdent for &str {
    fn into_ident(self) -> SqlResult<Ident> {
        Ident::parse(self)
    }
}

impl IntoIdent for String {
    fn into_ident(self) -> SqlResult<Ident> {
        Ident::parse(&self)
    }
}

impl IntoIdent for &String {
    fn into_ident(self) -> SqlResult<Ident> {
        Ident::parse(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_simple() {
        let ident = Ident::parse("message").unwrap();
        assert_eq!(ident.to_sql(), "message");
        assert_eq!(ident.name(), "message");
    }

    #[test]
    fn ident_quoted_with_escape() {
        let ident = Ident::parse(r#""has""quote""#).unwrap();
        assert_eq!(ident.name(), r#"has"quote"#);
        assert_eq!(ident.to_sql(), r#""has""quote""#);
    }

    #[test]
    fn ident_quoted_constructor_escapes() {
        let ident = Ident::quoted("my table").unwrap();
        assert_eq!(ident.to_sql(), r#""my table""#);
    }

    #[test]
    fn ident_with_dollar() {
        assert_eq!(Ident::parse("my_var$1").unwrap().to_sql(), "my_var$1");
    }

    #[test]
    fn ident_rejects_injection() {
        assert!(Ident::parse("t); DROP TABLE t; --").is_err());
        assert!(Ident::parse("my table").is_err());
        assert!(Ident::parse("main.t").is_err());
    }

    #[test]
    fn ident_accepts_unicode_letters() {
        assert_eq!(Ident::parse("café").unwrap().to_sql(), "café");
        assert_eq!(Ident::parse("_μήνυμα2").unwrap().name(), "_μήνυμα2");
        assert!(Ident::parse("café au lait").is_err());
    }

    #[test]
    fn ident_rejects_start_digit() {
        assert!(Ident::parse("1table").is_err());
    }

    #[test]
    fn ident_rejects_empty_and_unclosed() {
        assert!(Ident::parse("").is_err());
        assert!(Ident::parse(r#""unclosed"#).is_err());
        assert!(Ident::parse(r#""""#).is_err());
        assert!(Ident::parse(r#""a"b"#).is_err());
    }
}
