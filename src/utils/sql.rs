//! SQL text helpers.

use crate::{Error, Result};

/// Quote an identifier for use in SQL text.
///
/// Embedded double quotes are doubled. Empty names and names containing NUL are rejected.
pub fn quote_ident(name: &str) -> Result<String> {
    if name.is_empty() || name.contains('\0') {
        return Err(Error::InvalidIdentifier(name.to_string()));
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

/// Collapse whitespace so multi-line statements log on one line.
pub fn compact(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Column type affinity, derived from a declared type the way SQLite does it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affinity {
    Integer,
    Text,
    Blob,
    Real,
    Numeric,
}

impl Affinity {
    pub fn from_declared(declared: &str) -> Self {
        let upper = declared.to_ascii_uppercase();
        if upper.contains("INT") {
            Affinity::Integer
        } else if upper.contains("CHAR") || upper.contains("CLOB") || upper.contains("TEXT") {
            Affinity::Text
        } else if upper.is_empty() || upper.contains("BLOB") {
            Affinity::Blob
        } else if upper.contains("REAL") || upper.contains("FLOA") || upper.contains("DOUB") {
            Affinity::Real
        } else {
            Affinity::Numeric
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("courses").unwrap(), "\"courses\"");
        assert_eq!(quote_ident("odd\"name").unwrap(), "\"odd\"\"name\"");
        assert!(quote_ident("").is_err());
    }

    #[test]
    fn test_compact() {
        assert_eq!(
            compact("SELECT *\n        FROM courses\n    ORDER BY prefix;"),
            "SELECT * FROM courses ORDER BY prefix;"
        );
    }

    #[test]
    fn test_affinity() {
        assert_eq!(Affinity::from_declared("INT"), Affinity::Integer);
        assert_eq!(Affinity::from_declared("VARCHAR"), Affinity::Text);
        assert_eq!(Affinity::from_declared(""), Affinity::Blob);
        assert_eq!(Affinity::from_declared("DOUBLE"), Affinity::Real);
        assert_eq!(Affinity::from_declared("DECIMAL(10,2)"), Affinity::Numeric);
    }
}
