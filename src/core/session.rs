//! The signed-in session as persisted in the local store.

use std::sync::Arc;

use crate::core::client::constants::{STORE_KEY_TOKEN, STORE_KEY_USER};
use crate::core::storage::{LocalStore, read_json, write_json};
use crate::core::{SvError, User};

/// Token and user persisted across client restarts.
#[derive(Debug, Clone)]
pub struct Session {
    store: Arc<dyn LocalStore>,
}

impl Session {
    pub(crate) fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    /// The bearer token, if signed in.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn token(&self) -> Result<Option<String>, SvError> {
        Ok(self.store.get(STORE_KEY_TOKEN)?.filter(|t| !t.is_empty()))
    }

    /// The signed-in user, if any. A corrupt record reads as signed out.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn user(&self) -> Result<Option<User>, SvError> {
        match read_json::<User>(self.store.as_ref(), STORE_KEY_USER) {
            Err(SvError::Json(_)) => Ok(None),
            other => other,
        }
    }

    /// Whether a token is stored.
    pub fn is_signed_in(&self) -> bool {
        matches!(self.token(), Ok(Some(_)))
    }

    /// Persists a new session.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save(&self, token: &str, user: &User) -> Result<(), SvError> {
        self.store.set(STORE_KEY_TOKEN, token)?;
        write_json(self.store.as_ref(), STORE_KEY_USER, user)
    }

    /// Replaces the stored user, keeping the token.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn update_user(&self, user: &User) -> Result<(), SvError> {
        write_json(self.store.as_ref(), STORE_KEY_USER, user)
    }

    /// Forgets token and user.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn clear(&self) -> Result<(), SvError> {
        self.store.remove(STORE_KEY_TOKEN)?;
        self.store.remove(STORE_KEY_USER)
    }
}
