//! Page data state.
//!
//! Every page runs a single query that starts out `Loading` and settles on
//! either the data or a user-facing error message. The underlying error is
//! logged; the page only ever shows a generic message.
//!
//! # Example
//!
//! ```ignore
//! let state = Query::new("waste categories")
//!   .run(client.waste_categories())
//!   .await
//!   .into_state();
//!
//! match &state {
//!   QueryState::Loading => render_spinner(),
//!   QueryState::Success(data) => render_data(data),
//!   QueryState::Error(e) => render_error(e),
//! }
//! ```

use std::fmt::Display;
use std::future::Future;

use tracing::{debug, error};

/// The state of a query
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
  /// Query is currently fetching data
  Loading,
  /// Query completed successfully
  Success(T),
  /// Query failed; holds the message shown to the user
  Error(String),
}

impl<T> QueryState<T> {
  pub fn error(&self) -> Option<&str> {
    match self {
      QueryState::Error(e) => Some(e),
      _ => None,
    }
  }
}

/// One page query for a named resource.
#[derive(Debug)]
pub struct Query<T> {
  resource: String,
  state: QueryState<T>,
}

impl<T> Query<T> {
  /// Create a query for `resource` ("waste categories", "recycling center", ...).
  pub fn new(resource: impl Into<String>) -> Self {
    Self {
      resource: resource.into(),
      state: QueryState::Loading,
    }
  }

  pub fn into_state(self) -> QueryState<T> {
    self.state
  }

  /// Run the fetch to completion and settle the state.
  pub async fn run<E, Fut>(mut self, fetch: Fut) -> Self
  where
    E: Display,
    Fut: Future<Output = Result<T, E>>,
  {
    debug!(resource = %self.resource, "Loading");
    self.state = match fetch.await {
      Ok(data) => QueryState::Success(data),
      Err(e) => {
        error!(resource = %self.resource, error = %e, "Failed to load");
        QueryState::Error(failure_message(&self.resource))
      }
    };
    self
  }
}

/// Generic message shown when a page fails to load.
pub fn failure_message(resource: &str) -> String {
  format!("Failed to load {}. Please try again later.", resource)
}
