/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id SERIAL PRIMARY KEY,
///     username VARCHAR(255) NOT NULL UNIQUE,
///     password VARCHAR(255) NOT NULL
/// );
/// ```
///
/// The `password` column holds an Argon2id hash. [`User`] never carries it;
/// only [`User::authenticate`] reads it back, and only to verify.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::auth::password::hash_password;
/// use taskboard_shared::models::user::User;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("s3cret")?;
/// let user = User::create(&pool, "alice", &hash).await?;
///
/// let same = User::authenticate(&pool, "alice", "s3cret").await?;
/// assert_eq!(user.id, same.id);
/// # Ok(())
/// # }
/// ```

use crate::auth::password;
use crate::db::pool::connect;
use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{debug, warn};

/// Public view of a user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Database-assigned id
    pub id: i32,

    /// Unique login name
    pub username: String,
}

/// Row used during login; carries the stored hash
#[derive(sqlx::FromRow)]
struct UserCredentials {
    id: i32,
    username: String,
    password: String,
}

impl User {
    /// Registers a new user
    ///
    /// `password_hash` must already be hashed; see
    /// [`crate::auth::password::hash_password`].
    ///
    /// # Errors
    ///
    /// - [`StoreError::DuplicateUsername`] if the username is taken
    /// - [`StoreError::Connection`] / [`StoreError::Database`] otherwise
    pub async fn create(pool: &PgPool, username: &str, password_hash: &str) -> StoreResult<Self> {
        let mut conn = connect(pool).await?;

        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            RETURNING id, username
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&mut *conn)
        .await;

        match result {
            Ok(user) => {
                debug!(user_id = user.id, "Created user");
                Ok(user)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                warn!("Unable to create a new user account: {}", db_err);
                Err(StoreError::DuplicateUsername(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Checks a username and plaintext password against the stored hash
    ///
    /// # Errors
    ///
    /// - [`StoreError::UnknownUser`] if no account has this username
    /// - [`StoreError::InvalidPassword`] if the password does not verify
    /// - [`StoreError::Password`] if the stored hash cannot be parsed
    pub async fn authenticate(pool: &PgPool, username: &str, password: &str) -> StoreResult<Self> {
        let mut conn = connect(pool).await?;

        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, username, password FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| StoreError::UnknownUser(username.to_string()))?;

        if !password::verify_password(password, &credentials.password)? {
            return Err(StoreError::InvalidPassword);
        }

        Ok(User {
            id: credentials.id,
            username: credentials.username,
        })
    }
}
