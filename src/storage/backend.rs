//! Storage backend abstraction.
//!
//! This module defines the [`KeyValueStore`] trait that abstracts over the
//! places session secrets and preferences can live. The auth session, the
//! transport and the worker only ever see this trait.
//!
//! Values are opaque strings. Structured values (the cached user) are
//! JSON-encoded by the caller.

use crate::domain::error::Result;

/// Abstraction over persistent key/value backends.
///
/// # Implementations
///
/// - [`JsonStore`](crate::storage::JsonStore): JSON file with atomic writes (default)
/// - [`MemoryStore`](crate::storage::MemoryStore): process-local, used with `--ephemeral` and in tests
///
/// # Examples
///
/// ```
/// use dinedeck::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.set("token", "abc")?;
/// assert_eq!(store.get("token")?.as_deref(), Some("abc"));
/// store.delete("token")?;
/// assert_eq!(store.get("token")?, None);
/// # Ok::<(), dinedeck::DineError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Returns the value stored under `key`, or `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete(&mut self, key: &str) -> Result<()>;
}
