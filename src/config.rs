use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_API_URL;
use crate::cache::FRESHNESS_SECS;
use crate::session::FileStore;

/// Environment variable overriding `api.url`.
pub const API_URL_ENV: &str = "WASTESORT_API_URL";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
  #[serde(default)]
  pub api: ApiConfig,
  #[serde(default)]
  pub cache: CacheConfig,
  #[serde(default)]
  pub session: SessionConfig,
  #[serde(default)]
  pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiConfig {
  #[serde(default = "default_api_url")]
  pub url: String,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      url: default_api_url(),
    }
  }
}

fn default_api_url() -> String {
  DEFAULT_API_URL.to_string()
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CacheConfig {
  /// Set to false to always hit the network
  #[serde(default = "default_true")]
  pub enabled: bool,
  /// How long a fetched list is served without refetching
  #[serde(default = "default_freshness_secs")]
  pub freshness_secs: u64,
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      enabled: true,
      freshness_secs: default_freshness_secs(),
    }
  }
}

fn default_true() -> bool {
  true
}

fn default_freshness_secs() -> u64 {
  FRESHNESS_SECS as u64
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SessionConfig {
  /// Credential file (defaults to $XDG_DATA_HOME/wastesort/session.json)
  pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct LogConfig {
  /// Log directory (defaults to $XDG_DATA_HOME/wastesort/logs)
  pub dir: Option<PathBuf>,
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./wastesort.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/wastesort/config.yaml
  ///
  /// Without a file the defaults point at the hosted API.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    let config = match path {
      Some(p) => Self::load_from_path(&p)?,
      None => Config::default(),
    };

    Ok(config.with_env_overrides(std::env::var(API_URL_ENV).ok()))
  }

  fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("wastesort.yaml");
    if local.exists() {
      return Some(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("wastesort").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    // An empty file is a valid, all-defaults config
    if contents.trim().is_empty() {
      return Ok(Config::default());
    }

    let config: Config = serde_yaml::from_str(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))?;

    Ok(config)
  }

  fn with_env_overrides(mut self, api_url: Option<String>) -> Self {
    if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
      self.api.url = url;
    }
    self
  }

  /// Apply the `--api-url` flag, which wins over everything else.
  pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
    if let Some(url) = api_url {
      self.api.url = url;
    }
    self
  }

  pub fn session_path(&self) -> Result<PathBuf> {
    self
      .session
      .path
      .clone()
      .or_else(FileStore::default_path)
      .ok_or_else(|| eyre!("Could not determine a data directory; set session.path"))
  }

  pub fn log_dir(&self) -> Result<PathBuf> {
    self
      .log
      .dir
      .clone()
      .or_else(|| {
        dirs::data_dir()
          .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
          .map(|dir| dir.join("wastesort").join("logs"))
      })
      .ok_or_else(|| eyre!("Could not determine a data directory; set log.dir"))
  }
}
