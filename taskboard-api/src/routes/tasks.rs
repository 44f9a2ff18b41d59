/// Task endpoints
///
/// - `POST /gettasks` - List tasks by category and completion state
/// - `POST /gettask` - Fetch one task
/// - `POST /updatetask` - Replace a task's editable fields
/// - `POST /completetask` / `POST /incompletetask` - Flip the completion flag
/// - `POST /deletetask` - Delete a task
/// - `POST /addtask` - Create a task
///
/// Ids come from the request body; the caller is trusted.

use super::{nullable, or_default, UserRef};
use crate::{app::AppState, error::ApiResult, extract::JsonBody};
use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use taskboard_shared::models::task::{CompletionFilter, CreateTask, Task, TaskFilter, UpdateTask};

/// `/gettasks` request
///
/// `category_id` of `-1` lists across all categories; `completion_status`
/// is 0 (all), 1 (completed) or anything else (incomplete).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QueryTasksParams {
    #[serde(deserialize_with = "or_default")]
    pub category_id: i32,
    #[serde(deserialize_with = "or_default")]
    pub completion_status: CompletionFilter,
    #[serde(deserialize_with = "or_default")]
    pub user: UserRef,
}

/// Request naming a single task
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TaskIdParams {
    #[serde(deserialize_with = "or_default")]
    pub id: i32,
}

/// `/updatetask` request
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateTaskParams {
    #[serde(deserialize_with = "or_default")]
    pub id: i32,
    #[serde(deserialize_with = "or_default")]
    pub title: String,
    #[serde(deserialize_with = "or_default")]
    pub description: String,
    #[serde(deserialize_with = "or_default")]
    pub category_id: i32,

    /// Absent or null clears the deadline
    #[serde(deserialize_with = "nullable")]
    pub deadline: Option<Option<DateTime<Utc>>>,
}

/// `/addtask` request
///
/// Any `completed` field in the body is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateTaskParams {
    #[serde(deserialize_with = "or_default")]
    pub title: String,
    #[serde(deserialize_with = "or_default")]
    pub description: String,
    #[serde(deserialize_with = "or_default")]
    pub category_id: i32,

    /// Absent or null means no deadline
    #[serde(deserialize_with = "nullable")]
    pub deadline: Option<Option<DateTime<Utc>>>,

    #[serde(deserialize_with = "or_default")]
    pub user: UserRef,
}

/// List tasks
///
/// # Endpoint
///
/// ```text
/// POST /gettasks
///
/// { "category_id": -1, "completion_status": 0, "user": { "id": 1 } }
/// ```
///
/// # Response
///
/// Array of tasks ordered by id; `[]` when nothing matches.
pub async fn get_tasks(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<QueryTasksParams>,
) -> ApiResult<Json<Vec<Task>>> {
    let filter = TaskFilter::from_wire(
        params.category_id,
        params.completion_status,
        params.user.id,
    );

    let tasks = Task::list(&state.db, filter).await?;
    Ok(Json(tasks))
}

/// Fetch one task
///
/// An unknown id is a 500, the same as any other failed lookup.
pub async fn get_task(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<TaskIdParams>,
) -> ApiResult<Json<Task>> {
    let task = Task::find_by_id(&state.db, params.id).await?;
    Ok(Json(task))
}

/// Replace title, description, category and deadline
///
/// Responds with a JSON string. An unknown id still reports success.
pub async fn update_task(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<UpdateTaskParams>,
) -> ApiResult<Json<String>> {
    let id = params.id;

    Task::update(
        &state.db,
        UpdateTask {
            id,
            category_id: params.category_id,
            title: params.title,
            description: params.description,
            deadline: params.deadline.flatten(),
        },
    )
    .await?;

    Ok(Json(format!("Successfully updated task with id: {}", id)))
}

/// Mark a task completed
pub async fn complete_task(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<TaskIdParams>,
) -> ApiResult<Json<String>> {
    Task::complete(&state.db, params.id).await?;

    Ok(Json(format!(
        "Successfully completed task with id: {}",
        params.id
    )))
}

/// Mark a task incomplete
pub async fn incomplete_task(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<TaskIdParams>,
) -> ApiResult<Json<String>> {
    Task::incomplete(&state.db, params.id).await?;

    Ok(Json(format!(
        "Successfully marked task as incomplete with id: {}",
        params.id
    )))
}

/// Delete a task
///
/// Responds with plain text. Deleting an id that does not exist is a 500.
pub async fn delete_task(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<TaskIdParams>,
) -> ApiResult<String> {
    Task::delete(&state.db, params.id).await?;

    Ok(format!("Successfully deleted task with id: {}", params.id))
}

/// Create a task
///
/// # Endpoint
///
/// ```text
/// POST /addtask
///
/// {
///   "title": "Water plants",
///   "description": "",
///   "category_id": 3,
///   "deadline": "2030-01-01T09:00:00Z",
///   "user": { "id": 1 }
/// }
/// ```
///
/// Responds 200 with an empty body.
pub async fn add_task(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<CreateTaskParams>,
) -> ApiResult<StatusCode> {
    Task::create(
        &state.db,
        CreateTask {
            user_id: params.user.id,
            category_id: params.category_id,
            title: params.title,
            description: params.description,
            deadline: params.deadline.flatten(),
        },
    )
    .await?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_deadline_tri_state() {
        let absent: CreateTaskParams = serde_json::from_str(
            r#"{"title": "t", "description": "", "category_id": 1, "user": {"id": 1}}"#,
        )
        .unwrap();
        assert_eq!(absent.deadline, None);

        let null: CreateTaskParams = serde_json::from_str(
            r#"{"title": "t", "description": "", "category_id": 1, "deadline": null, "user": {"id": 1}}"#,
        )
        .unwrap();
        assert_eq!(null.deadline, Some(None));

        let set: CreateTaskParams = serde_json::from_str(
            r#"{"title": "t", "description": "", "category_id": 1, "deadline": "2030-01-02T03:04:05Z", "user": {"id": 1}}"#,
        )
        .unwrap();
        assert_eq!(
            set.deadline,
            Some(Some(Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap()))
        );

        // Both "no value" forms persist as no deadline
        assert_eq!(absent.deadline.flatten(), None);
        assert_eq!(null.deadline.flatten(), None);
    }

    #[test]
    fn test_completed_field_is_ignored() {
        let params: CreateTaskParams = serde_json::from_str(
            r#"{"title": "t", "description": "", "category_id": 1, "completed": true, "user": {"id": 1}}"#,
        )
        .unwrap();
        assert_eq!(params.title, "t");
    }

    #[test]
    fn test_query_params_decode() {
        let params: QueryTasksParams = serde_json::from_str(
            r#"{"category_id": -1, "completion_status": 3, "user": {"id": 8}}"#,
        )
        .unwrap();

        assert_eq!(params.completion_status, CompletionFilter::Incomplete);

        let filter = TaskFilter::from_wire(
            params.category_id,
            params.completion_status,
            params.user.id,
        );
        assert_eq!(filter.category_id, None);
        assert_eq!(filter.user_id, 8);
    }

    #[test]
    fn test_missing_fields_take_zero_values() {
        let params: UpdateTaskParams = serde_json::from_str(r#"{"id": 1, "title": "t"}"#).unwrap();
        assert_eq!(params.id, 1);
        assert_eq!(params.description, "");
        assert_eq!(params.category_id, 0);
        assert_eq!(params.deadline, None);

        let params: CreateTaskParams = serde_json::from_str(r#"{"title": null}"#).unwrap();
        assert_eq!(params.title, "");
        assert_eq!(params.user.id, 0);

        let params: QueryTasksParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.category_id, 0);
        assert_eq!(params.completion_status, CompletionFilter::All);
    }

    #[test]
    fn test_wrong_type_still_fails() {
        let result = serde_json::from_str::<TaskIdParams>(r#"{"id": "1"}"#);
        assert!(result.is_err());
    }
}
