/// Error type for data-access operations
///
/// Every operation in [`crate::models`] returns `Result<T, StoreError>`.
/// The variants separate infrastructure failures (connection, statement)
/// from the outcomes callers are expected to branch on (duplicate username,
/// bad credentials, missing rows).

use crate::auth::password::PasswordError;

/// Result alias for data-access operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Data-access failure
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Could not obtain a database connection
    #[error("{0}")]
    Connection(#[source] sqlx::Error),

    /// A query or statement failed after a connection was obtained
    #[error("{0}")]
    Database(#[source] sqlx::Error),

    /// Signup with a username that is already registered
    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    /// Login with a username that has no account
    #[error("unknown username: {0}")]
    UnknownUser(String),

    /// Login where the stored hash does not verify against the password
    #[error("password does not match")]
    InvalidPassword,

    /// A single-row lookup matched nothing
    #[error("no rows in result set")]
    NotFound,

    /// A write touched a different number of rows than expected
    #[error("{action}: expected {expected} affected row(s), got {actual}")]
    AffectedRows {
        action: &'static str,
        expected: u64,
        actual: u64,
    },

    /// Password hashing or verification failed
    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl StoreError {
    /// Checks that a write touched exactly `expected` rows
    pub fn check_affected(action: &'static str, expected: u64, actual: u64) -> StoreResult<()> {
        if actual == expected {
            Ok(())
        } else {
            Err(StoreError::AffectedRows {
                action,
                expected,
                actual,
            })
        }
    }
}

/// Statement errors that surface from sqlx after the connection was acquired
///
/// `RowNotFound` only comes back from `fetch_one`, so it maps to
/// [`StoreError::NotFound`]. Everything else is a statement failure.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_affected_exact() {
        assert!(StoreError::check_affected("delete task", 1, 1).is_ok());
    }

    #[test]
    fn test_check_affected_mismatch() {
        let err = StoreError::check_affected("delete task", 1, 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "delete task: expected 1 affected row(s), got 0"
        );
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StoreError::NotFound));
        assert_eq!(err.to_string(), "no rows in result set");
    }

    #[test]
    fn test_other_sqlx_errors_map_to_database() {
        let err: StoreError = sqlx::Error::Protocol("bad message".into()).into();
        assert!(matches!(err, StoreError::Database(_)));
    }
}
