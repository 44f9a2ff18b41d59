/// Task model and database operations
///
/// Reads go through the server-side functions created by the migrations,
/// which join each task with its category's title. Writes hit the `tasks`
/// table directly.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id SERIAL PRIMARY KEY,
///     user_id INTEGER NOT NULL REFERENCES users(id),
///     category_id INTEGER NOT NULL REFERENCES categories(id),
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     deadline TIMESTAMPTZ,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ DEFAULT NOW(),
///     updated_at TIMESTAMPTZ DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::task::{CompletionFilter, CreateTask, Task, TaskFilter};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// Task::create(&pool, CreateTask {
///     user_id: 1,
///     category_id: 1,
///     title: "Water plants".to_string(),
///     description: String::new(),
///     deadline: None,
/// }).await?;
///
/// let open = Task::list(&pool, TaskFilter {
///     category_id: None,
///     completion: CompletionFilter::Incomplete,
///     user_id: 1,
/// }).await?;
/// # Ok(())
/// # }
/// ```

use crate::db::pool::connect;
use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;

/// Wire value of `category_id` that disables category filtering
pub const NO_CATEGORY: i32 = -1;

/// Task as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i32,

    pub title: String,

    pub description: String,

    pub category_id: i32,

    /// Title of the owning category
    pub category_name: String,

    /// None when the task has no deadline
    pub deadline: Option<DateTime<Utc>>,

    pub completed: bool,

    pub created_at: Option<DateTime<Utc>>,

    pub updated_at: Option<DateTime<Utc>>,
}

/// Which tasks to return by completion state
///
/// Decoded from the wire integer: `0` is [`All`](Self::All), `1` is
/// [`Completed`](Self::Completed), and every other value is
/// [`Incomplete`](Self::Incomplete). The default is `All`, matching a
/// `completion_status` of `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum CompletionFilter {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl From<i64> for CompletionFilter {
    fn from(value: i64) -> Self {
        match value {
            0 => CompletionFilter::All,
            1 => CompletionFilter::Completed,
            _ => CompletionFilter::Incomplete,
        }
    }
}

impl From<CompletionFilter> for i64 {
    fn from(filter: CompletionFilter) -> Self {
        match filter {
            CompletionFilter::All => 0,
            CompletionFilter::Completed => 1,
            CompletionFilter::Incomplete => 2,
        }
    }
}

/// Selection criteria for [`Task::list`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskFilter {
    /// Restrict to one category; None lists across all the user's categories
    pub category_id: Option<i32>,

    pub completion: CompletionFilter,

    /// Owner whose tasks are listed when no category is given
    pub user_id: i32,
}

impl TaskFilter {
    /// Builds a filter from the wire form, where [`NO_CATEGORY`] means "any"
    pub fn from_wire(category_id: i32, completion: CompletionFilter, user_id: i32) -> Self {
        Self {
            category_id: (category_id != NO_CATEGORY).then_some(category_id),
            completion,
            user_id,
        }
    }

    /// SQL for this filter; the single bind parameter is the category id
    /// when one is set and the user id otherwise
    fn query(&self) -> (&'static str, i32) {
        match (self.category_id, self.completion) {
            (None, CompletionFilter::All) => (
                "SELECT * FROM public.get_all_tasks($1) ORDER BY id",
                self.user_id,
            ),
            (None, CompletionFilter::Completed) => (
                "SELECT * FROM public.get_completed_tasks($1) ORDER BY id",
                self.user_id,
            ),
            (None, CompletionFilter::Incomplete) => (
                "SELECT * FROM public.get_incomplete_tasks($1) ORDER BY id",
                self.user_id,
            ),
            (Some(category_id), CompletionFilter::All) => (
                "SELECT * FROM public.get_tasks_in_category($1) ORDER BY id",
                category_id,
            ),
            (Some(category_id), CompletionFilter::Completed) => (
                "SELECT * FROM public.get_tasks_in_category($1) WHERE completed = TRUE ORDER BY id",
                category_id,
            ),
            (Some(category_id), CompletionFilter::Incomplete) => (
                "SELECT * FROM public.get_tasks_in_category($1) WHERE completed = FALSE ORDER BY id",
                category_id,
            ),
        }
    }
}

/// Input for creating a task
///
/// There is no `completed` field; new tasks always start incomplete.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub user_id: i32,
    pub category_id: i32,
    pub title: String,
    pub description: String,
    pub deadline: Option<DateTime<Utc>>,
}

/// Full replacement of a task's editable fields
#[derive(Debug, Clone)]
pub struct UpdateTask {
    pub id: i32,
    pub category_id: i32,
    pub title: String,
    pub description: String,
    /// None clears the deadline
    pub deadline: Option<DateTime<Utc>>,
}

impl Task {
    /// Lists tasks matching `filter`, ascending by id
    ///
    /// An empty result is `Ok(vec![])`.
    pub async fn list(pool: &PgPool, filter: TaskFilter) -> StoreResult<Vec<Self>> {
        let (sql, key) = filter.query();
        debug!(?filter, "Listing tasks");

        let mut conn = connect(pool).await?;

        let tasks = sqlx::query_as::<_, Task>(sql)
            .bind(key)
            .fetch_all(&mut *conn)
            .await?;

        Ok(tasks)
    }

    /// Fetches a single task
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if no task has this id
    pub async fn find_by_id(pool: &PgPool, id: i32) -> StoreResult<Self> {
        let mut conn = connect(pool).await?;

        let task = sqlx::query_as::<_, Task>("SELECT * FROM public.get_task_by_id($1)")
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;

        Ok(task)
    }

    /// Overwrites category, title, description and deadline
    ///
    /// An id that matches nothing is not an error.
    pub async fn update(pool: &PgPool, data: UpdateTask) -> StoreResult<()> {
        let mut conn = connect(pool).await?;

        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET category_id = $1, title = $2, description = $3, deadline = $4
            WHERE id = $5
            "#,
        )
        .bind(data.category_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.deadline)
        .bind(data.id)
        .execute(&mut *conn)
        .await?;

        debug!(task_id = data.id, rows = result.rows_affected(), "Updated task");
        Ok(())
    }

    /// Marks a task completed
    pub async fn complete(pool: &PgPool, id: i32) -> StoreResult<()> {
        Self::set_completed(pool, id, true).await
    }

    /// Marks a task incomplete
    pub async fn incomplete(pool: &PgPool, id: i32) -> StoreResult<()> {
        Self::set_completed(pool, id, false).await
    }

    async fn set_completed(pool: &PgPool, id: i32, completed: bool) -> StoreResult<()> {
        let mut conn = connect(pool).await?;

        sqlx::query("UPDATE tasks SET completed = $1 WHERE id = $2")
            .bind(completed)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    /// Deletes a task
    ///
    /// # Errors
    ///
    /// [`StoreError::AffectedRows`] if no task has this id
    pub async fn delete(pool: &PgPool, id: i32) -> StoreResult<()> {
        let mut conn = connect(pool).await?;

        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        StoreError::check_affected("No row found to delete", 1, result.rows_affected())?;

        debug!(task_id = id, "Deleted task");
        Ok(())
    }

    /// Inserts a new incomplete task
    ///
    /// # Errors
    ///
    /// [`StoreError::AffectedRows`] if the insert did not touch exactly one
    /// row; statement errors (e.g. unknown category) as
    /// [`StoreError::Database`].
    pub async fn create(pool: &PgPool, data: CreateTask) -> StoreResult<()> {
        let mut conn = connect(pool).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO tasks (category_id, title, description, deadline, user_id, completed)
            VALUES ($1, $2, $3, $4, $5, FALSE)
            "#,
        )
        .bind(data.category_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.deadline)
        .bind(data.user_id)
        .execute(&mut *conn)
        .await?;

        StoreError::check_affected("Task not added to db", 1, result.rows_affected())?;

        debug!(user_id = data.user_id, category_id = data.category_id, "Created task");
        Ok(())
    }
}
