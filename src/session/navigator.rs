//! Fixed routes and the navigation seam used by the interceptors.

use std::fmt;
use std::sync::Mutex;

use tracing::warn;

/// A page location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
  Home,
  Login { expired: bool },
  Register,
  Dashboard,
  WasteCategories,
  WasteCategory(String),
  DisposalGuidelines,
  DisposalGuideline(String),
  RecyclingCenters,
  RecyclingCenter(String),
  Reports,
}

impl Route {
  pub fn path(&self) -> String {
    match self {
      Route::Home => "/".to_string(),
      Route::Login { expired: false } => "/login".to_string(),
      Route::Login { expired: true } => "/login?expired=true".to_string(),
      Route::Register => "/register".to_string(),
      Route::Dashboard => "/dashboard".to_string(),
      Route::WasteCategories => "/waste-categories".to_string(),
      Route::WasteCategory(id) => format!("/waste-categories/{}", id),
      Route::DisposalGuidelines => "/disposal-guidelines".to_string(),
      Route::DisposalGuideline(id) => format!("/disposal-guidelines/{}", id),
      Route::RecyclingCenters => "/recycling-centers".to_string(),
      Route::RecyclingCenter(id) => format!("/recycling-centers/{}", id),
      Route::Reports => "/reports".to_string(),
    }
  }

  pub fn is_login(&self) -> bool {
    matches!(self, Route::Login { .. })
  }

  /// Public pages render without a stored token.
  pub fn requires_auth(&self) -> bool {
    !matches!(self, Route::Home | Route::Login { .. } | Route::Register)
  }
}

impl fmt::Display for Route {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.path())
  }
}

/// Where the client is and where it should go next.
pub trait Navigator: Send + Sync {
  fn current(&self) -> Route;

  fn redirect(&self, route: Route);
}

/// Navigator for a single CLI invocation.
///
/// The current route is the page the running subcommand renders. Redirects are
/// recorded rather than followed; the caller reports them once the page is done.
#[derive(Debug)]
pub struct Router {
  current: Mutex<Route>,
  pending: Mutex<Option<Route>>,
}

impl Router {
  pub fn new(route: Route) -> Self {
    Self {
      current: Mutex::new(route),
      pending: Mutex::new(None),
    }
  }

  /// Take the most recent redirect, if any.
  pub fn take_redirect(&self) -> Option<Route> {
    self.pending.lock().ok().and_then(|mut pending| pending.take())
  }
}

impl Navigator for Router {
  fn current(&self) -> Route {
    self
      .current
      .lock()
      .map(|route| route.clone())
      .unwrap_or(Route::Home)
  }

  fn redirect(&self, route: Route) {
    warn!(from = %self.current(), to = %route, "Redirecting");

    if let Ok(mut pending) = self.pending.lock() {
      *pending = Some(route.clone());
    }
    if let Ok(mut current) = self.current.lock() {
      *current = route;
    }
  }
}
