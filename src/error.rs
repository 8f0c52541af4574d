// Error types for the waste sorting client.
// Covers transport failures, auth outcomes, HTTP status errors and local storage.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
  #[error("Request failed: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("Session expired or unauthorized, please log in again")]
  Unauthorized,

  #[error("Invalid credentials")]
  InvalidCredentials,

  #[error("An account with that username or email already exists")]
  AccountExists,

  #[error("The server issued an access token that has already expired")]
  ExpiredToken,

  #[error("HTTP {status}: {message}")]
  Status { status: StatusCode, message: String },

  #[error("{0}")]
  Validation(String),

  #[error("Invalid URL: {0}")]
  Url(#[from] url::ParseError),

  #[error("JSON parsing error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Storage error: {0}")]
  Storage(String),
}

pub type Result<T> = std::result::Result<T, PortalError>;
