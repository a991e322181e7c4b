//! Error types for coursedb.

use rusqlite::ErrorCode;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for coursedb.
#[derive(Error, Debug)]
pub enum Error {
    // Constraint errors
    #[error("Integrity error: {0}")]
    Integrity(String),

    // Frame errors
    #[error("Schema mismatch on table {table}: {reason}")]
    SchemaMismatch { table: String, reason: String },

    #[error("Table already exists: {0}")]
    TableExists(String),

    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    // File errors
    #[error("Database not found: {0}")]
    DatabaseNotFound(String),

    // Engine errors
    #[error("SQLite error: {0}")]
    Sqlite(rusqlite::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Create a schema mismatch error for `table`.
    pub fn schema_mismatch<T: Into<String>, R: Into<String>>(table: T, reason: R) -> Self {
        Error::SchemaMismatch {
            table: table.into(),
            reason: reason.into(),
        }
    }

    /// Whether this is a constraint violation raised by the engine.
    pub fn is_integrity(&self) -> bool {
        matches!(self, Error::Integrity(_))
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(code, message)
                if code.code == ErrorCode::ConstraintViolation =>
            {
                Error::Integrity(message.unwrap_or_else(|| code.to_string()))
            }
            other => Error::Sqlite(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_violation_maps_to_integrity() {
        let failure = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE),
            Some("UNIQUE constraint failed: courses.prefix, courses.number".to_string()),
        );
        let err = Error::from(failure);
        assert!(err.is_integrity());
        assert!(err.to_string().contains("courses.prefix"));
    }

    #[test]
    fn test_other_sqlite_errors_stay_sqlite() {
        let err = Error::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(err, Error::Sqlite(_)));
        assert!(!err.is_integrity());
    }
}
