//! Shared auth session backed by a key/value store.
//!
//! A [`Session`] is cheap to clone; every clone sees the same store. The
//! transport reads the bearer token and stored credentials from it, the
//! gateway writes it after login, and logout clears it.

use crate::domain::error::{DineError, Result};
use crate::domain::{AuthResponse, LoginData, User};
use crate::storage::models::{PASSWORD_KEY, REFRESH_TOKEN_KEY, SESSION_KEYS, TOKEN_KEY, USER_KEY};
use crate::storage::KeyValueStore;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub struct Session {
    store: Arc<Mutex<Box<dyn KeyValueStore>>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Arc::new(Mutex::new(Box::new(store))),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Box<dyn KeyValueStore>>> {
        self.store
            .lock()
            .map_err(|_| DineError::Storage("session store lock poisoned".to_string()))
    }

    /// Bearer token, if one is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn token(&self) -> Result<Option<String>> {
        self.lock()?.get(TOKEN_KEY)
    }

    /// A session is authenticated when a token is present.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.token()?.is_some())
    }

    /// The cached user.
    ///
    /// A value that no longer parses is treated as no user.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn user(&self) -> Result<Option<User>> {
        let Some(raw) = self.lock()?.get(USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "stored user is not valid JSON");
                Ok(None)
            }
        }
    }

    /// Email of the cached user paired with the stored password.
    ///
    /// Returns `Ok(None)` unless both are present.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn credentials(&self) -> Result<Option<LoginData>> {
        let Some(user) = self.user()? else {
            return Ok(None);
        };
        let password = self.lock()?.get(PASSWORD_KEY)?;
        Ok(password.map(|password| LoginData {
            email: user.email,
            password,
        }))
    }

    /// Persists token, refresh token and user from an auth response.
    ///
    /// # Errors
    ///
    /// Returns an error if the user cannot be encoded or the store write fails.
    pub fn save_auth(&self, response: &AuthResponse) -> Result<()> {
        let user_json = serde_json::to_string(&response.user)?;
        let mut store = self.lock()?;
        store.set(TOKEN_KEY, &response.token)?;
        store.set(REFRESH_TOKEN_KEY, &response.refresh_token)?;
        store.set(USER_KEY, &user_json)?;
        tracing::debug!(email = %response.user.email, "auth data saved");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn save_password(&self, password: &str) -> Result<()> {
        self.lock()?.set(PASSWORD_KEY, password)
    }

    /// Deletes every session key.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn clear(&self) -> Result<()> {
        let mut store = self.lock()?;
        for key in SESSION_KEYS {
            store.delete(key)?;
        }
        tracing::debug!("session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn response(email: &str, token: &str) -> AuthResponse {
        AuthResponse {
            message: "ok".into(),
            user: User::new(email),
            token: token.into(),
            refresh_token: format!("{token}-refresh"),
        }
    }

    #[test]
    fn save_auth_then_read_back() {
        let session = Session::new(MemoryStore::new());
        assert!(!session.is_authenticated().unwrap());

        session.save_auth(&response("ana@example.com", "t1")).unwrap();
        assert_eq!(session.token().unwrap().as_deref(), Some("t1"));
        assert_eq!(session.user().unwrap().unwrap().email, "ana@example.com");

        // No password yet, so no credentials.
        assert_eq!(session.credentials().unwrap(), None);

        session.save_password("hunter22").unwrap();
        let creds = session.credentials().unwrap().unwrap();
        assert_eq!(creds.email, "ana@example.com");
        assert_eq!(creds.password, "hunter22");
    }

    #[test]
    fn clones_share_the_store_and_clear_removes_everything() {
        let session = Session::new(MemoryStore::new());
        let other = session.clone();
        session.save_auth(&response("a@b.co", "t")).unwrap();
        session.save_password("pw").unwrap();

        other.clear().unwrap();
        assert_eq!(session.token().unwrap(), None);
        assert_eq!(session.user().unwrap(), None);
        assert_eq!(session.credentials().unwrap(), None);
    }

    #[test]
    fn garbage_user_reads_as_none() {
        let session = Session::new(MemoryStore::with_entries([("user", "{oops")]));
        assert_eq!(session.user().unwrap(), None);
    }
}
