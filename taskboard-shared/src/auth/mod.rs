/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
///
/// Login only checks credentials; no tokens are issued.

pub mod password;
