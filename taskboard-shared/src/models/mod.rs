/// Database models for Taskboard
///
/// Each model owns its queries as associated functions taking the shared
/// `PgPool`.
///
/// # Models
///
/// - `user`: accounts, signup and credential checks
/// - `category`: per-user task categories
/// - `task`: tasks, filtering, completion and deletion

pub mod category;
pub mod task;
pub mod user;
