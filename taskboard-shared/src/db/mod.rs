/// Database layer for Taskboard
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool and per-operation connection checkout
/// - `migrations`: Schema migrations embedded from `migrations/`
///
/// Record types and their queries are in the `models` module.

pub mod migrations;
pub mod pool;
