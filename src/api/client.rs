// Waste sorting API HTTP client.
// Handles bearer authorization, token expiry and response status mapping.

use std::sync::Arc;

use reqwest::{header::ACCEPT, Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{PortalError, Result};
use crate::session::{token, Navigator, Route, Session};

use super::types::MessageResponse;

/// Base URL of the hosted API.
pub const DEFAULT_API_URL: &str = "https://waste-sorting-api.onrender.com/api";

/// API client with credential handling.
///
/// Every request passes through two interceptors: `authorize` attaches the
/// stored bearer token (or drops it when expired) and `check_response` turns
/// error statuses into `PortalError`s, forcing re-authentication on 401.
#[derive(Clone)]
pub struct ApiClient {
  http: Client,
  base_url: Url,
  session: Session,
  navigator: Arc<dyn Navigator>,
}

impl ApiClient {
  /// Create a new client for the API rooted at `base_url`.
  pub fn new(base_url: &str, session: Session, navigator: Arc<dyn Navigator>) -> Result<Self> {
    let base_url = Url::parse(base_url)?;
    if base_url.cannot_be_a_base() {
      return Err(PortalError::Validation(format!(
        "API URL cannot be used as a base: {}",
        base_url
      )));
    }

    let http = Client::builder()
      .user_agent(concat!("wastesort/", env!("CARGO_PKG_VERSION")))
      .build()?;

    Ok(Self {
      http,
      base_url,
      session,
      navigator,
    })
  }

  pub fn session(&self) -> &Session {
    &self.session
  }

  /// Build the URL for an endpoint from its path segments.
  /// Segments are percent-encoded, so identifiers can be passed verbatim.
  pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
    let mut url = self.base_url.clone();
    url
      .path_segments_mut()
      .map_err(|_| PortalError::Validation(format!("Invalid API base URL: {}", self.base_url)))?
      .pop_if_empty()
      .extend(segments);
    Ok(url)
  }

  /// Make a GET request and return the JSON body.
  pub async fn get(&self, segments: &[&str]) -> Result<Value> {
    let url = self.endpoint(segments)?;
    debug!(%url, "GET");

    let request = self.authorize(self.http.get(url).header(ACCEPT, "application/json"));
    let response = request.send().await?;
    self.check_response(response).await
  }

  /// Make a POST request with a JSON body and return the JSON body.
  pub async fn post<B: Serialize + ?Sized>(&self, segments: &[&str], body: &B) -> Result<Value> {
    let url = self.endpoint(segments)?;
    debug!(%url, "POST");

    let request = self.authorize(
      self
        .http
        .post(url)
        .header(ACCEPT, "application/json")
        .json(body),
    );
    let response = request.send().await?;
    self.check_response(response).await
  }

  /// Request interceptor: attach the stored credential if it is still valid.
  ///
  /// An expired (or undecodable) credential is cleared, the user is sent to
  /// the login page and the request goes out unauthenticated.
  fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
    let stored = match self.session.token() {
      Ok(stored) => stored,
      Err(e) => {
        warn!(error = %e, "Could not read stored credential, sending unauthenticated");
        None
      }
    };

    match stored {
      None => request,
      Some(token) if token::is_expired(&token) => {
        warn!("Stored credential has expired");
        self.expire_session();
        request
      }
      Some(token) => request.bearer_auth(token),
    }
  }

  /// Response interceptor: map error statuses.
  async fn check_response(&self, response: Response) -> Result<Value> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
      if self.navigator.current().is_login() {
        debug!("401 on the login page, not redirecting");
      } else {
        warn!(url = %response.url(), "Request was unauthorized");
        self.expire_session();
      }
      return Err(PortalError::Unauthorized);
    }

    let text = response.text().await?;

    if !status.is_success() {
      let message = serde_json::from_str::<MessageResponse>(&text)
        .ok()
        .and_then(|body| body.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
          status
            .canonical_reason()
            .unwrap_or("Unexpected response")
            .to_string()
        });
      return Err(PortalError::Status { status, message });
    }

    if text.trim().is_empty() {
      return Ok(Value::Null);
    }

    match serde_json::from_str(&text) {
      Ok(value) => Ok(value),
      Err(e) => {
        warn!(error = %e, "Response body is not JSON");
        Ok(Value::Null)
      }
    }
  }

  /// Forget the credential and send the user to the login page.
  fn expire_session(&self) {
    if let Err(e) = self.session.clear() {
      warn!(error = %e, "Failed to clear stored credential");
    }
    self.navigator.redirect(Route::Login { expired: true });
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;
  use crate::session::{token::token_expiring_in, Router};
  use mockito::{Matcher, Server};
  use serde_json::json;

  pub(crate) fn test_client(base_url: &str, route: Route) -> (ApiClient, Arc<Router>) {
    let router = Arc::new(Router::new(route));
    let client = ApiClient::new(base_url, Session::in_memory(), router.clone()).unwrap();
    (client, router)
  }

  #[test]
  fn test_endpoint_building() {
    let (client, _) = test_client("https://example.com/api", Route::Home);
    assert_eq!(
      client.endpoint(&["waste-categories", "7"]).unwrap().as_str(),
      "https://example.com/api/waste-categories/7"
    );

    let (client, _) = test_client("https://example.com/api/", Route::Home);
    assert_eq!(
      client.endpoint(&["reports", "by-status"]).unwrap().as_str(),
      "https://example.com/api/reports/by-status"
    );

    assert_eq!(
      client.endpoint(&["waste-categories", "a/b c"]).unwrap().as_str(),
      "https://example.com/api/waste-categories/a%2Fb%20c"
    );
  }

  #[test]
  fn test_rejects_invalid_base_url() {
    let router = Arc::new(Router::new(Route::Home));
    assert!(ApiClient::new("not a url", Session::in_memory(), router.clone()).is_err());
    assert!(ApiClient::new("mailto:someone@example.com", Session::in_memory(), router).is_err());
  }

  #[tokio::test]
  async fn test_valid_token_is_attached() {
    let mut server = Server::new_async().await;
    let token = token_expiring_in(3600);
    let mock = server
      .mock("GET", "/waste-categories")
      .match_header("authorization", Matcher::Exact(format!("Bearer {}", token)))
      .with_status(200)
      .with_body("[]")
      .create_async()
      .await;

    let (client, router) = test_client(&server.url(), Route::WasteCategories);
    client.session().persist(&token, &test_profile()).unwrap();

    let body = client.get(&["waste-categories"]).await.unwrap();
    assert_eq!(body, json!([]));
    assert_eq!(router.take_redirect(), None);
    mock.assert_async().await;
  }

  #[tokio::test]
  async fn test_missing_token_sends_unauthenticated() {
    let mut server = Server::new_async().await;
    let mock = server
      .mock("GET", "/waste-categories")
      .match_header("authorization", Matcher::Missing)
      .with_status(200)
      .with_body("[]")
      .create_async()
      .await;

    let (client, router) = test_client(&server.url(), Route::WasteCategories);
    client.get(&["waste-categories"]).await.unwrap();

    assert_eq!(router.take_redirect(), None);
    mock.assert_async().await;
  }

  #[tokio::test]
  async fn test_expired_token_is_never_attached() {
    let mut server = Server::new_async().await;
    let mock = server
      .mock("GET", "/disposal-guidelines")
      .match_header("authorization", Matcher::Missing)
      .with_status(200)
      .with_body("[]")
      .create_async()
      .await;

    let (client, router) = test_client(&server.url(), Route::DisposalGuidelines);
    client
      .session()
      .persist(&token_expiring_in(-10), &test_profile())
      .unwrap();

    client.get(&["disposal-guidelines"]).await.unwrap();

    mock.assert_async().await;
    assert_eq!(client.session().token().unwrap(), None);
    assert_eq!(client.session().profile().unwrap(), None);
    assert_eq!(router.take_redirect(), Some(Route::Login { expired: true }));
  }

  #[tokio::test]
  async fn test_undecodable_token_is_treated_as_expired() {
    let mut server = Server::new_async().await;
    let mock = server
      .mock("GET", "/reports/comprehensive")
      .match_header("authorization", Matcher::Missing)
      .with_status(200)
      .with_body("{}")
      .create_async()
      .await;

    let (client, router) = test_client(&server.url(), Route::Reports);
    client.session().persist("opaque", &test_profile()).unwrap();

    client.get(&["reports", "comprehensive"]).await.unwrap();

    mock.assert_async().await;
    assert_eq!(router.take_redirect(), Some(Route::Login { expired: true }));
  }

  #[tokio::test]
  async fn test_unauthorized_clears_session_and_redirects() {
    let mut server = Server::new_async().await;
    let _mock = server
      .mock("GET", "/recycling-centers")
      .with_status(401)
      .with_body(r#"{"message":"Unauthorized"}"#)
      .create_async()
      .await;

    let (client, router) = test_client(&server.url(), Route::RecyclingCenters);
    client
      .session()
      .persist(&token_expiring_in(3600), &test_profile())
      .unwrap();

    let result = client.get(&["recycling-centers"]).await;

    assert!(matches!(result, Err(PortalError::Unauthorized)));
    assert_eq!(client.session().token().unwrap(), None);
    assert_eq!(router.take_redirect(), Some(Route::Login { expired: true }));
  }

  #[tokio::test]
  async fn test_unauthorized_on_login_page_does_not_redirect() {
    let mut server = Server::new_async().await;
    let _mock = server
      .mock("POST", "/auth/signin")
      .with_status(401)
      .create_async()
      .await;

    let (client, router) = test_client(&server.url(), Route::Login { expired: false });
    client
      .session()
      .persist(&token_expiring_in(3600), &test_profile())
      .unwrap();

    let result = client.post(&["auth", "signin"], &json!({})).await;

    assert!(matches!(result, Err(PortalError::Unauthorized)));
    assert_eq!(router.take_redirect(), None);
    assert!(client.session().token().unwrap().is_some());
  }

  #[tokio::test]
  async fn test_other_errors_propagate_with_message() {
    let mut server = Server::new_async().await;
    let _not_found = server
      .mock("GET", "/waste-categories/99")
      .with_status(404)
      .with_body(r#"{"message":"Waste category not found with id: 99"}"#)
      .create_async()
      .await;
    let _server_error = server
      .mock("GET", "/reports/by-status")
      .with_status(500)
      .with_body("boom")
      .create_async()
      .await;

    let (client, router) = test_client(&server.url(), Route::Dashboard);

    match client.get(&["waste-categories", "99"]).await {
      Err(PortalError::Status { status, message }) => {
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "Waste category not found with id: 99");
      }
      other => panic!("unexpected result: {:?}", other),
    }

    match client.get(&["reports", "by-status"]).await {
      Err(PortalError::Status { status, message }) => {
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Internal Server Error");
      }
      other => panic!("unexpected result: {:?}", other),
    }

    assert_eq!(router.take_redirect(), None);
  }

  #[tokio::test]
  async fn test_non_json_success_body_is_null() {
    let mut server = Server::new_async().await;
    let _mock = server
      .mock("GET", "/waste-categories")
      .with_status(200)
      .with_body("<html>maintenance</html>")
      .create_async()
      .await;

    let (client, _) = test_client(&server.url(), Route::WasteCategories);
    assert_eq!(client.get(&["waste-categories"]).await.unwrap(), Value::Null);
  }

  #[tokio::test]
  async fn test_post_sends_json_body() {
    let mut server = Server::new_async().await;
    let mock = server
      .mock("POST", "/auth/signup")
      .match_header("content-type", "application/json")
      .match_body(Matcher::Json(json!({ "username": "alice" })))
      .with_status(200)
      .with_body(r#"{"message":"ok"}"#)
      .create_async()
      .await;

    let (client, _) = test_client(&server.url(), Route::Register);
    let body = client
      .post(&["auth", "signup"], &json!({ "username": "alice" }))
      .await
      .unwrap();

    assert_eq!(body, json!({ "message": "ok" }));
    mock.assert_async().await;
  }

  pub(crate) fn test_profile() -> crate::api::types::UserProfile {
    crate::api::types::UserProfile {
      id: "1".into(),
      username: "alice".into(),
      email: "alice@example.com".into(),
      roles: vec!["ROLE_USER".into()],
    }
  }
}
