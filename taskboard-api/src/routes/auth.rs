/// Account endpoints
///
/// - `POST /signup` - Register a new user
/// - `POST /login` - Check credentials
///
/// Both return the user record `{id, username}`. No token or session is
/// issued; later requests identify the user by the id they send.

use super::or_default;
use crate::{app::AppState, error::ApiResult, extract::JsonBody};
use axum::{extract::State, Json};
use serde::Deserialize;
use taskboard_shared::{auth::password, models::user::User};

/// Signup and login request
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    #[serde(deserialize_with = "or_default")]
    pub username: String,

    /// Plaintext; hashed before storage and never logged
    #[serde(deserialize_with = "or_default")]
    pub password: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /signup
/// Content-Type: application/json
///
/// { "username": "alice", "password": "s3cret" }
/// ```
///
/// # Response
///
/// ```json
/// { "id": 1, "username": "alice" }
/// ```
///
/// # Errors
///
/// - `406 Not Acceptable`: Body did not parse
/// - `409 Conflict`: Username already taken
/// - `500 Internal Server Error`: Database or hashing failure
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<Credentials>,
) -> ApiResult<Json<User>> {
    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(&state.db, &req.username, &password_hash).await?;

    tracing::info!(user_id = user.id, "User signed up");
    Ok(Json(user))
}

/// Log in an existing user
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// { "username": "alice", "password": "s3cret" }
/// ```
///
/// # Errors
///
/// - `406 Not Acceptable`: Body did not parse
/// - `401 Unauthorized`: Unknown username or wrong password
/// - `500 Internal Server Error`: Database failure
pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<Credentials>,
) -> ApiResult<Json<User>> {
    let user = User::authenticate(&state.db, &req.username, &req.password).await?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_missing_password_is_empty() {
        let creds: Credentials = serde_json::from_str(r#"{"username": "alice"}"#).unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, "");

        let creds: Credentials = serde_json::from_str(r#"{"username": null}"#).unwrap();
        assert_eq!(creds.username, "");
    }
}
