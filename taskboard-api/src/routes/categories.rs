/// Category endpoints
///
/// - `POST /addcategory` - Create a category for a user
/// - `POST /allcategories` - List a user's categories

use super::{or_default, UserRef};
use crate::{app::AppState, error::ApiResult, extract::JsonBody};
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use taskboard_shared::models::category::{Category, CreateCategory};

/// `/addcategory` request
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateCategoryParams {
    #[serde(deserialize_with = "or_default")]
    pub category_name: String,
    #[serde(deserialize_with = "or_default")]
    pub user: UserRef,
}

/// Create a category
///
/// ```text
/// POST /addcategory
///
/// { "category_name": "Errands", "user": { "id": 1 } }
/// ```
///
/// Responds 200 with an empty body.
pub async fn add_category(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<CreateCategoryParams>,
) -> ApiResult<StatusCode> {
    Category::create(
        &state.db,
        CreateCategory {
            user_id: params.user.id,
            title: params.category_name,
        },
    )
    .await?;

    Ok(StatusCode::OK)
}

/// List a user's categories, ordered by id
///
/// The body is the user record itself: `{ "id": 1 }`.
pub async fn all_categories(
    State(state): State<AppState>,
    JsonBody(user): JsonBody<UserRef>,
) -> ApiResult<Json<Vec<Category>>> {
    let categories = Category::list_by_user(&state.db, user.id).await?;
    Ok(Json(categories))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_category_fields_default() {
        let params: CreateCategoryParams =
            serde_json::from_str(r#"{"category_name": "Errands"}"#).unwrap();
        assert_eq!(params.category_name, "Errands");
        assert_eq!(params.user.id, 0);
    }
}
