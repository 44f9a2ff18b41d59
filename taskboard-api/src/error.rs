/// Error handling for the API server
///
/// Handlers return `ApiResult<T>`. Any `?` on a failed parse or data-access
/// call returns from the handler with an `ApiError`, which renders as a
/// status code and a JSON body of the form `{"error": "<message>"}`.
///
/// | Variant | Status |
/// |---|---|
/// | `NotAcceptable` | 406 (request body did not parse) |
/// | `Unauthorized` | 401 (unknown user or wrong password) |
/// | `Conflict` | 409 (username taken) |
/// | `InternalError` | 500 (connection, statement or affected-row failure) |
///
/// # Example
///
/// ```
/// use taskboard_api::error::{ApiError, ApiResult};
/// use axum::Json;
///
/// async fn handler() -> ApiResult<Json<String>> {
///     Err(ApiError::Conflict("Username already taken.".to_string()))
/// }
/// ```

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use taskboard_shared::{auth::password::PasswordError, error::StoreError};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Not acceptable (406) - malformed or missing JSON body
    NotAcceptable(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Conflict (409) - e.g., duplicate username
    Conflict(String),

    /// Internal server error (500)
    InternalError(String),
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::NotAcceptable(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Conflict(msg)
            | ApiError::InternalError(msg) => msg,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotAcceptable(msg) => write!(f, "Not acceptable: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Backend detail is passed through to the client as-is
        match &self {
            ApiError::InternalError(msg) => {
                tracing::error!("Unable to perform the requested action: {}", msg)
            }
            ApiError::NotAcceptable(msg) => tracing::warn!("{}", msg),
            other => tracing::warn!("{}", other),
        }

        let body = Json(ErrorResponse {
            error: self.message().to_string(),
        });

        (status, body).into_response()
    }
}

/// Convert body-read failures to 406
impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::NotAcceptable(rejection.body_text())
    }
}

/// Convert body-decode failures to 406
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::NotAcceptable(format!("Unable to parse JSON body: {}", err))
    }
}

/// Convert data-access errors to API errors
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername(_) => {
                ApiError::Conflict("Username already taken.".to_string())
            }
            StoreError::UnknownUser(_) => {
                ApiError::Unauthorized("Username doesn't exist.".to_string())
            }
            StoreError::InvalidPassword => ApiError::Unauthorized("Wrong password.".to_string()),
            StoreError::Connection(_)
            | StoreError::Database(_)
            | StoreError::NotFound
            | StoreError::AffectedRows { .. }
            | StoreError::Password(_) => ApiError::InternalError(err.to_string()),
        }
    }
}

/// Convert password hashing errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}
