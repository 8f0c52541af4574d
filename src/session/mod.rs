//! Client session: the stored credential, the user profile and navigation.
//!
//! The session owns no global state. A `Session` wraps whichever
//! `CredentialStore` it was constructed with, so tests run against a
//! `MemoryStore` while the CLI uses a `FileStore`.

mod navigator;
mod store;
pub mod token;

use std::sync::Arc;

use tracing::warn;

use crate::api::types::UserProfile;
use crate::error::Result;

pub use navigator::{Navigator, Route, Router};
#[cfg(test)]
pub use store::MemoryStore;
pub use store::{CredentialStore, FileStore, TOKEN_KEY, USER_KEY};

/// Authentication state derived from the stored credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
  Unauthenticated,
  Authenticated,
}

/// Accessor over the persisted credential and profile.
#[derive(Clone)]
pub struct Session {
  store: Arc<dyn CredentialStore>,
}

impl Session {
  pub fn new(store: Arc<dyn CredentialStore>) -> Self {
    Self { store }
  }

  /// Session over a throwaway in-memory store.
  #[cfg(test)]
  pub fn in_memory() -> Self {
    Self::new(Arc::new(MemoryStore::new()))
  }

  pub fn token(&self) -> Result<Option<String>> {
    self.store.get(TOKEN_KEY)
  }

  /// The stored profile. An unreadable profile is treated as absent.
  pub fn profile(&self) -> Result<Option<UserProfile>> {
    let Some(raw) = self.store.get(USER_KEY)? else {
      return Ok(None);
    };

    match serde_json::from_str(&raw) {
      Ok(profile) => Ok(Some(profile)),
      Err(e) => {
        warn!(error = %e, "Ignoring unreadable stored profile");
        Ok(None)
      }
    }
  }

  pub fn state(&self) -> Result<AuthState> {
    Ok(match self.token()? {
      Some(_) => AuthState::Authenticated,
      None => AuthState::Unauthenticated,
    })
  }

  /// Persist a freshly issued credential and its profile.
  pub fn persist(&self, token: &str, profile: &UserProfile) -> Result<()> {
    self.store.set(TOKEN_KEY, token)?;
    self.store.set(USER_KEY, &serde_json::to_string(profile)?)
  }

  /// Forget the credential and profile.
  pub fn clear(&self) -> Result<()> {
    self.store.remove(TOKEN_KEY)?;
    self.store.remove(USER_KEY)
  }
}
