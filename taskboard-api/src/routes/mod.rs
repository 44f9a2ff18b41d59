/// API route handlers
///
/// - `health`: `/ping` and `/health`
/// - `auth`: signup and login
/// - `tasks`: task listing, lookup, mutation and deletion
/// - `categories`: category creation and listing

pub mod auth;
pub mod categories;
pub mod health;
pub mod tasks;

use serde::{Deserialize, Deserializer};

/// User reference embedded in request bodies as `"user": {"id": N}`
///
/// Extra fields such as `username` are accepted and ignored.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct UserRef {
    #[serde(deserialize_with = "or_default")]
    pub id: i32,
}

/// Deserializes a field where `null` means the type's default
///
/// Request structs also carry `#[serde(default)]`, so a field that is absent
/// or null falls back to `0`, `""` or an empty [`UserRef`]. Only a value of
/// the wrong type fails to parse.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Deserializes a field that may be absent, null, or set
///
/// Use with `#[serde(default)]`: absent gives `None`, `null` gives
/// `Some(None)`, a value gives `Some(Some(v))`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
