/// Category model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE categories (
///     id SERIAL PRIMARY KEY,
///     user_id INTEGER NOT NULL REFERENCES users(id),
///     title VARCHAR(255) NOT NULL
/// );
/// ```
///
/// Categories are created and listed; there is no update or delete.

use crate::db::pool::connect;
use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;

/// A user's category
///
/// Serialized as `{"category_id": .., "category_name": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    #[serde(rename = "category_id")]
    pub id: i32,

    #[serde(rename = "category_name")]
    pub title: String,
}

/// Input for creating a category
#[derive(Debug, Clone)]
pub struct CreateCategory {
    /// Owner of the new category
    pub user_id: i32,

    pub title: String,
}

impl Category {
    /// Inserts a category owned by `data.user_id`
    ///
    /// # Errors
    ///
    /// [`StoreError::AffectedRows`] if the insert did not touch exactly one
    /// row; statement errors (e.g. unknown user id) as
    /// [`StoreError::Database`].
    pub async fn create(pool: &PgPool, data: CreateCategory) -> StoreResult<()> {
        let mut conn = connect(pool).await?;

        let result = sqlx::query("INSERT INTO categories (user_id, title) VALUES ($1, $2)")
            .bind(data.user_id)
            .bind(&data.title)
            .execute(&mut *conn)
            .await?;

        StoreError::check_affected("Category not added to db", 1, result.rows_affected())?;

        debug!(user_id = data.user_id, "Created category");
        Ok(())
    }

    /// Lists every category owned by `user_id`, ascending by id
    pub async fn list_by_user(pool: &PgPool, user_id: i32) -> StoreResult<Vec<Self>> {
        let mut conn = connect(pool).await?;

        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, title FROM categories WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_names() {
        let category = Category {
            id: 3,
            title: "Errands".to_string(),
        };

        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"category_id": 3, "category_name": "Errands"})
        );
    }
}
