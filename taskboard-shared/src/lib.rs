//! # Taskboard Shared Library
//!
//! Data access for the Taskboard API server.
//!
//! ## Module Organization
//!
//! - `db`: connection pool and migrations
//! - `models`: users, categories and tasks with their queries
//! - `auth`: password hashing
//! - `error`: data-access error type

pub mod auth;
pub mod db;
pub mod error;
pub mod models;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
