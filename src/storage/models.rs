//! Storage record models and well-known keys.
//!
//! Keys match the names the backend API clients have always used, so a store
//! file can be inspected by hand.

use serde::{Deserialize, Serialize};

/// Bearer token for authenticated requests.
pub const TOKEN_KEY: &str = "token";
/// Refresh token returned alongside the bearer token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// JSON-encoded [`User`](crate::domain::User).
pub const USER_KEY: &str = "user";
/// Password retained for silent re-login after a 401.
pub const PASSWORD_KEY: &str = "password";
/// Persisted theme mode (`"light"` or `"dark"`).
pub const THEME_KEY: &str = "theme";

/// All keys owned by the auth session; cleared together on logout.
pub const SESSION_KEYS: [&str; 4] = [TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY, PASSWORD_KEY];

/// A single stored value with its last modification time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    /// Opaque value.
    pub value: String,

    /// Unix timestamp of the last write.
    pub updated_at: i64,
}

impl StoredEntry {
    /// Creates an entry stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dinedeck::storage::StoredEntry;
    ///
    /// let entry = StoredEntry::new("dark");
    /// assert_eq!(entry.value, "dark");
    /// assert!(entry.updated_at > 0);
    /// ```
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            updated_at: chrono::Utc::now().timestamp(),
        }
    }
}
