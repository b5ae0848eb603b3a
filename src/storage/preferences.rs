//! User preferences stored next to, but separate from, the auth session.

use crate::domain::error::{DineError, Result};
use crate::storage::models::THEME_KEY;
use crate::storage::KeyValueStore;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct Preferences {
    store: Arc<Mutex<Box<dyn KeyValueStore>>>,
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences").finish_non_exhaustive()
    }
}

impl Preferences {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Arc::new(Mutex::new(Box::new(store))),
        }
    }

    /// Saved theme mode name, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn theme(&self) -> Result<Option<String>> {
        self.store
            .lock()
            .map_err(|_| DineError::Storage("preferences lock poisoned".to_string()))?
            .get(THEME_KEY)
    }

    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn set_theme(&self, mode: &str) -> Result<()> {
        self.store
            .lock()
            .map_err(|_| DineError::Storage("preferences lock poisoned".to_string()))?
            .set(THEME_KEY, mode)
    }
}
