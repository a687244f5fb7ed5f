//! Session persistence.
//!
//! A [`Session`] is created only by a successful sign-in or sign-up, restored
//! from storage at startup, and torn down by logout. Pages that need an
//! authenticated user take a `&Session`; nothing reads the stored flag
//! directly.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::storage::Storage;

/// Storage key holding the authenticated flag.
pub const AUTH_FLAG_KEY: &str = "isAuthenticated";

/// Storage key holding the current user object.
pub const USER_KEY: &str = "user";

const AUTH_FLAG_VALUE: &str = "true";

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Email the user signed in with.
    pub email: String,
}

/// Reads and writes the session keys.
#[derive(Debug, Clone, Copy)]
pub struct SessionStore<'a> {
    storage: &'a Storage,
}

impl<'a> SessionStore<'a> {
    /// Wrap a storage handle.
    #[must_use]
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Persist a new session for `email` and return it.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails.
    pub(crate) fn begin(&self, email: &str) -> Result<Session> {
        let session = Session {
            email: email.to_string(),
        };
        self.storage.set_item(AUTH_FLAG_KEY, AUTH_FLAG_VALUE)?;
        self.storage
            .set_item(USER_KEY, &serde_json::to_string(&session)?)?;
        info!(email = %session.email, "Session started");
        Ok(session)
    }

    /// Restore the persisted session, if any.
    ///
    /// The flag alone decides whether a session exists. A missing or
    /// unreadable user object yields a session with an empty email.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage read fails.
    pub fn restore(&self) -> Result<Option<Session>> {
        if self.storage.get_item(AUTH_FLAG_KEY)?.is_none() {
            return Ok(None);
        }

        let session = match self.storage.get_item(USER_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Stored session user is unreadable");
                Session {
                    email: String::new(),
                }
            }),
            None => Session {
                email: String::new(),
            },
        };
        Ok(Some(session))
    }

    /// End the session, removing both keys.
    ///
    /// Returns `true` if a session was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails.
    pub fn end(&self) -> Result<bool> {
        let had_flag = self.storage.remove_item(AUTH_FLAG_KEY)?;
        self.storage.remove_item(USER_KEY)?;
        if had_flag {
            info!("Session ended");
        }
        Ok(had_flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_session_initially() {
        let storage = Storage::open_in_memory().unwrap();
        assert_eq!(SessionStore::new(&storage).restore().unwrap(), None);
    }

    #[test]
    fn test_begin_persists_flag_and_user() {
        let storage = Storage::open_in_memory().unwrap();
        let session = SessionStore::new(&storage).begin("a@b.co").unwrap();

        assert_eq!(session.email, "a@b.co");
        assert_eq!(
            storage.get_item(AUTH_FLAG_KEY).unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(
            storage.get_item(USER_KEY).unwrap().as_deref(),
            Some(r#"{"email":"a@b.co"}"#)
        );
    }

    #[test]
    fn test_restore_after_begin() {
        let storage = Storage::open_in_memory().unwrap();
        let sessions = SessionStore::new(&storage);
        let started = sessions.begin("a@b.co").unwrap();

        assert_eq!(sessions.restore().unwrap(), Some(started));
    }

    #[test]
    fn test_flag_alone_is_enough() {
        let storage = Storage::open_in_memory().unwrap();
        storage.set_item(AUTH_FLAG_KEY, "true").unwrap();

        let session = SessionStore::new(&storage).restore().unwrap().unwrap();
        assert!(session.email.is_empty());
    }

    #[test]
    fn test_end_removes_keys() {
        let storage = Storage::open_in_memory().unwrap();
        let sessions = SessionStore::new(&storage);
        sessions.begin("a@b.co").unwrap();

        assert!(sessions.end().unwrap());
        assert_eq!(sessions.restore().unwrap(), None);
        assert_eq!(storage.get_item(USER_KEY).unwrap(), None);
        assert!(!sessions.end().unwrap());
    }
}
