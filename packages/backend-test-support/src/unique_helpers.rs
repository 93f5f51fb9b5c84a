//! Test helpers for generating unique test data
//!
//! ULID-suffixed values keep tests isolated when they share a database.

use ulid::Ulid;

/// Generate a unique string with the given prefix, formatted `{prefix}-{ulid}`.
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("game");
/// let b = unique_str("game");
/// assert_ne!(a, b);
/// assert!(a.starts_with("game-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique organizer subject, shaped like an auth provider `sub` claim.
pub fn unique_owner_sub(prefix: &str) -> String {
    format!("{}|{}", prefix, Ulid::new().to_string().to_lowercase())
}

/// Generate a unique email address, formatted `{prefix}-{ulid}@example.test`.
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new())
}
