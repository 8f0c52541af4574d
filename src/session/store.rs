//! Persistent key/value credential storage.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use tracing::warn;

use crate::error::{PortalError, Result};

/// Key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the JSON-encoded user profile.
pub const USER_KEY: &str = "user";

/// Trait for persistent client-side storage backends.
pub trait CredentialStore: Send + Sync {
  fn get(&self, key: &str) -> Result<Option<String>>;

  fn set(&self, key: &str, value: &str) -> Result<()>;

  fn remove(&self, key: &str) -> Result<()>;
}

type Entries = BTreeMap<String, String>;

fn lock(entries: &Mutex<Entries>) -> Result<MutexGuard<'_, Entries>> {
  entries
    .lock()
    .map_err(|e| PortalError::Storage(format!("Lock poisoned: {}", e)))
}

/// Store that lives only as long as the process.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
  entries: Mutex<Entries>,
}

#[cfg(test)]
impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[cfg(test)]
impl CredentialStore for MemoryStore {
  fn get(&self, key: &str) -> Result<Option<String>> {
    Ok(lock(&self.entries)?.get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    lock(&self.entries)?.insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<()> {
    lock(&self.entries)?.remove(key);
    Ok(())
  }
}

/// Store backed by a JSON object file, rewritten on every change.
pub struct FileStore {
  path: PathBuf,
  entries: Mutex<Entries>,
}

impl FileStore {
  /// Open the store at `path`, loading existing entries if the file exists.
  /// An unreadable file starts the store empty; the next change rewrites it.
  pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
    let path = path.into();
    let entries = if path.exists() {
      let contents = fs::read_to_string(&path)?;
      if contents.trim().is_empty() {
        BTreeMap::new()
      } else {
        serde_json::from_str(&contents).unwrap_or_else(|e| {
          warn!(path = %path.display(), error = %e, "Discarding corrupt session file");
          BTreeMap::new()
        })
      }
    } else {
      BTreeMap::new()
    };

    Ok(Self {
      path,
      entries: Mutex::new(entries),
    })
  }

  /// Default location: `$XDG_DATA_HOME/wastesort/session.json`.
  pub fn default_path() -> Option<PathBuf> {
    dirs::data_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
      .map(|dir| dir.join("wastesort").join("session.json"))
  }

  fn flush(&self, entries: &Entries) -> Result<()> {
    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(entries)?;

    // Write atomically via temp file
    let temp_path = self.path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, &self.path)?;

    Ok(())
  }
}

impl CredentialStore for FileStore {
  fn get(&self, key: &str) -> Result<Option<String>> {
    Ok(lock(&self.entries)?.get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    let mut entries = lock(&self.entries)?;
    entries.insert(key.to_string(), value.to_string());
    self.flush(&entries)
  }

  fn remove(&self, key: &str) -> Result<()> {
    let mut entries = lock(&self.entries)?;
    if entries.remove(key).is_some() {
      self.flush(&entries)?;
    }
    Ok(())
  }
}
