//! Sign in, sign up and sign out.

use tracing::info;

use crate::error::{PortalError, Result};
use crate::session::token;

use super::cached_client::WasteClient;
use super::types::{JwtResponse, MessageResponse, SigninRequest, SignupRequest, UserProfile};

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;
const DEFAULT_ROLE: &str = "user";

/// Registration form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signup {
  pub username: String,
  pub email: String,
  pub password: String,
}

impl Signup {
  pub fn new(
    username: impl Into<String>,
    email: impl Into<String>,
    password: impl Into<String>,
  ) -> Self {
    Self {
      username: username.into(),
      email: email.into(),
      password: password.into(),
    }
  }

  fn normalize(mut self) -> Self {
    self.username = self.username.trim().to_string();
    self.email = self.email.trim().to_string();
    self
  }

  fn validate(&self) -> Result<()> {
    if self.username.chars().count() < MIN_USERNAME_LEN {
      return Err(PortalError::Validation(format!(
        "Username must be at least {} characters",
        MIN_USERNAME_LEN
      )));
    }
    if !is_valid_email(&self.email) {
      return Err(PortalError::Validation("Email is invalid".to_string()));
    }
    if self.password.chars().count() < MIN_PASSWORD_LEN {
      return Err(PortalError::Validation(format!(
        "Password must be at least {} characters",
        MIN_PASSWORD_LEN
      )));
    }
    Ok(())
  }

  fn into_request(self) -> SignupRequest {
    SignupRequest {
      username: self.username,
      email: self.email,
      password: self.password,
      role: vec![DEFAULT_ROLE.to_string()],
    }
  }
}

/// `local@domain.tld`, with a top-level domain of at least two letters.
fn is_valid_email(email: &str) -> bool {
  let Some((local, domain)) = email.rsplit_once('@') else {
    return false;
  };
  if local.is_empty() || local.contains(char::is_whitespace) {
    return false;
  }

  let Some((host, tld)) = domain.rsplit_once('.') else {
    return false;
  };
  !host.is_empty()
    && !host.contains(char::is_whitespace)
    && !host.contains('@')
    && tld.len() >= 2
    && tld.chars().all(|c| c.is_ascii_alphabetic())
}

impl WasteClient {
  /// Sign in and persist the issued credential.
  ///
  /// An already expired credential is rejected and nothing is stored.
  pub async fn login(&self, username: &str, password: &str) -> Result<JwtResponse> {
    let request = SigninRequest {
      username: username.trim().to_string(),
      password: password.to_string(),
    };

    let payload = match self.api().post(&["auth", "signin"], &request).await {
      Ok(payload) => payload,
      Err(PortalError::Unauthorized) => return Err(PortalError::InvalidCredentials),
      Err(e) => return Err(e),
    };
    let response: JwtResponse = serde_json::from_value(payload)?;

    if token::is_expired(&response.access_token) {
      return Err(PortalError::ExpiredToken);
    }

    self
      .session()
      .persist(&response.access_token, &response.profile())?;
    info!(username = %response.username, "Signed in");

    Ok(response)
  }

  /// Create an account. Returns the server's confirmation message.
  pub async fn register(&self, signup: Signup) -> Result<String> {
    let signup = signup.normalize();
    signup.validate()?;
    let username = signup.username.clone();

    let payload = match self
      .api()
      .post(&["auth", "signup"], &signup.into_request())
      .await
    {
      Ok(payload) => payload,
      Err(PortalError::Status { status, .. }) if status == reqwest::StatusCode::CONFLICT => {
        return Err(PortalError::AccountExists)
      }
      Err(e) => return Err(e),
    };

    info!(%username, "Registered account");
    let message = serde_json::from_value::<MessageResponse>(payload)
      .ok()
      .and_then(|body| body.message)
      .unwrap_or_else(|| "Registration successful".to_string());
    Ok(message)
  }

  /// Forget the stored credential and profile.
  pub fn logout(&self) -> Result<()> {
    self.session().clear()?;
    info!("Signed out");
    Ok(())
  }

  /// The signed-in user's profile, if any.
  pub fn current_user(&self) -> Result<Option<UserProfile>> {
    self.session().profile()
  }
}
