//! Error types for staffbook.
//!
//! This module defines all error types used throughout the staffbook crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

use crate::auth::AuthError;
use crate::employee::EmployeeId;

/// The main error type for staffbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Session & Credential Errors ===
    /// No session is active.
    #[error("not authenticated; run `staffbook login` first")]
    NotAuthenticated,

    /// A sign-in or sign-up attempt was rejected.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Hashing a password failed.
    #[error("failed to hash password")]
    PasswordHash,

    // === Record Errors ===
    /// No employee with the given id exists.
    #[error("no employee with id {id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        id: EmployeeId,
    },

    /// A field value could not be parsed.
    #[error("invalid {field}: {message}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// Description of the problem.
        message: String,
    },

    /// The employee form was rejected; the message lists every field error.
    #[error("employee form rejected: {0}")]
    FormRejected(String),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for staffbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid field error.
    #[must_use]
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// Check if this error means the caller has no session.
    #[must_use]
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, Self::NotAuthenticated)
    }

    /// Check if this error is a missing employee.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EmployeeNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmployeeNotFound {
            id: EmployeeId::Numeric(12345),
        };
        assert_eq!(err.to_string(), "no employee with id 12345");

        let err = Error::EmployeeNotFound {
            id: "emp-1".parse().unwrap(),
        };
        assert_eq!(err.to_string(), "no employee with id emp-1");
    }

    #[test]
    fn test_not_authenticated_mentions_login() {
        let err = Error::NotAuthenticated;
        assert!(err.is_not_authenticated());
        assert!(err.to_string().contains("login"));
        assert!(!Error::FormRejected("x".to_string()).is_not_authenticated());
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::EmployeeNotFound {
            id: EmployeeId::Numeric(1)
        }
        .is_not_found());
        assert!(!Error::NotAuthenticated.is_not_found());
    }

    #[test]
    fn test_invalid_field_display() {
        let err = Error::invalid_field("gender", "expected Male, Female or Other");
        let msg = err.to_string();
        assert!(msg.contains("gender"));
        assert!(msg.contains("Other"));
    }

    #[test]
    fn test_auth_error_is_transparent() {
        let err: Error = AuthError::UserNotFound.into();
        assert_eq!(err.to_string(), AuthError::UserNotFound.to_string());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_database_migration_error_display() {
        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "min_password_length".to_string(),
        };
        assert!(err.to_string().contains("min_password_length"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
