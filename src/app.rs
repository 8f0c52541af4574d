use std::sync::Arc;

use chrono::Duration;
use color_eyre::{eyre::eyre, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

use crate::api::{ApiClient, Signup, WasteClient};
use crate::cache::CacheLayer;
use crate::commands::{CategoryArgs, CenterArgs, Command, GuidelineArgs};
use crate::config::Config;
use crate::error::PortalError;
use crate::filter::{guideline_categories, CategoryFilter, CenterFilter, Filter, GuidelineFilter};
use crate::query::{Query, QueryState};
use crate::session::{AuthState, FileStore, Navigator, Route, Router, Session};
use crate::ui::views::dashboard::DashboardSummary;
use crate::ui::views::{categories, centers, dashboard, guidelines, reports};
use crate::ui::{render_detail, render_header, render_state};

/// Rendered page and whether it loaded successfully
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
  pub output: String,
  pub ok: bool,
}

impl Outcome {
  fn ok(output: String) -> Self {
    Self { output, ok: true }
  }

  fn failed(output: String) -> Self {
    Self { output, ok: false }
  }

  fn from_state<T>(state: &QueryState<T>, output: String) -> Self {
    Self {
      output,
      ok: state.error().is_none(),
    }
  }
}

/// Main application state for one CLI invocation
pub struct App {
  /// Base URL shown in the page header
  api_url: String,

  /// Records the current page and any redirect raised while rendering it
  router: Arc<Router>,

  /// Cached API client
  client: WasteClient,
}

impl App {
  /// Build the client stack for the page `route` from configuration.
  pub fn new(config: &Config, route: Route) -> Result<Self> {
    let store = FileStore::open(config.session_path()?)?;
    let session = Session::new(Arc::new(store));
    let router = Arc::new(Router::new(route));
    let api = ApiClient::new(&config.api.url, session, router.clone())?;

    let cache = if config.cache.enabled {
      let freshness = i64::try_from(config.cache.freshness_secs)
        .map_err(|_| eyre!("cache.freshness_secs is too large"))?;
      CacheLayer::in_memory().with_stale_time(Duration::seconds(freshness))
    } else {
      CacheLayer::disabled()
    };

    Ok(Self {
      api_url: config.api.url.clone(),
      router,
      client: WasteClient::new(api, cache),
    })
  }

  /// Render the page for `command`.
  pub async fn run(&self, command: Command) -> Result<Outcome> {
    let route = command.route();
    let session = self.client.session();

    let mut outcome = if route.requires_auth() && session.state()? == AuthState::Unauthenticated {
      self.router.redirect(Route::Login { expired: false });
      Outcome::failed(String::new())
    } else {
      self.dispatch(command).await?
    };

    if let Some(redirect) = self.router.take_redirect() {
      if redirect.is_login() && session.state()? == AuthState::Unauthenticated {
        outcome.output.push_str(&login_notice(&redirect));
        outcome.ok = false;
      }
    }

    outcome.output = format!(
      "{}\n{}",
      render_header(&self.api_url, &self.router.current()),
      outcome.output
    );
    Ok(outcome)
  }

  async fn dispatch(&self, command: Command) -> Result<Outcome> {
    match command {
      Command::Login { username, password } => {
        let password = resolve_password(password).await?;
        Ok(self.login(&username, &password).await)
      }
      Command::Register {
        username,
        email,
        password,
      } => {
        let password = resolve_password(password).await?;
        Ok(self.register(Signup::new(username, email, password)).await)
      }
      Command::Logout => {
        self.client.logout()?;
        Ok(Outcome::ok("Signed out.\n".to_string()))
      }
      Command::Whoami => {
        let profile = self.client.current_user()?;
        Ok(Outcome::ok(dashboard::render_profile(profile.as_ref())))
      }
      Command::Dashboard => self.dashboard().await,
      Command::Categories(args) => Ok(self.categories(&args).await),
      Command::Category { id } => {
        let state = Query::new("waste category details")
          .run(self.client.waste_category(&id))
          .await
          .into_state();
        let output = render_detail(&state, categories::NOT_FOUND, categories::render_category_detail);
        Ok(Outcome::from_state(&state, output))
      }
      Command::Guidelines(args) => Ok(self.guidelines(&args).await),
      Command::Guideline { id } => {
        let state = Query::new("disposal guideline details")
          .run(self.client.disposal_guideline(&id))
          .await
          .into_state();
        let output = render_detail(&state, guidelines::NOT_FOUND, guidelines::render_guideline_detail);
        Ok(Outcome::from_state(&state, output))
      }
      Command::Centers(args) => Ok(self.centers(&args).await),
      Command::Center { id } => {
        let state = Query::new("recycling center details")
          .run(self.client.recycling_center(&id))
          .await
          .into_state();
        let output = render_detail(&state, centers::NOT_FOUND, centers::render_center_detail);
        Ok(Outcome::from_state(&state, output))
      }
      Command::Reports { kind } => {
        let state = Query::new("report data")
          .run(self.client.report(kind))
          .await
          .into_state();
        let output = render_state(&state, reports::render_report);
        Ok(Outcome::from_state(&state, output))
      }
    }
  }

  async fn login(&self, username: &str, password: &str) -> Outcome {
    match self.client.login(username, password).await {
      Ok(response) => Outcome::ok(format!("Signed in as {}.\n", response.username)),
      Err(PortalError::InvalidCredentials) => {
        Outcome::failed("Invalid username or password.\n".to_string())
      }
      Err(PortalError::Status { status, message }) => {
        error!(%status, %message, "Login rejected");
        Outcome::failed(format!("{}\n", message))
      }
      Err(e) => {
        error!(error = %e, "Login failed");
        Outcome::failed("Login failed. Please try again later.\n".to_string())
      }
    }
  }

  async fn register(&self, signup: Signup) -> Outcome {
    let username = signup.username.trim().to_string();
    match self.client.register(signup).await {
      Ok(message) => Outcome::ok(format!(
        "{}\nYou can now sign in: wastesort login {}\n",
        message, username
      )),
      Err(e @ (PortalError::Validation(_) | PortalError::AccountExists)) => {
        Outcome::failed(format!("{}\n", e))
      }
      Err(PortalError::Status { status, message }) => {
        error!(%status, %message, "Registration rejected");
        Outcome::failed(format!("{}\n", message))
      }
      Err(e) => {
        error!(error = %e, "Registration failed");
        Outcome::failed("Registration failed. Please try again later.\n".to_string())
      }
    }
  }

  async fn dashboard(&self) -> Result<Outcome> {
    let profile = self.client.current_user()?;

    let client = &self.client;
    let state = Query::new("dashboard data")
      .run(async {
        let (categories, centers, guidelines) = futures::try_join!(
          client.waste_categories(),
          client.recycling_centers(),
          client.disposal_guidelines()
        )?;
        Ok::<_, PortalError>(DashboardSummary {
          categories,
          centers: centers.len(),
          guidelines: guidelines.len(),
        })
      })
      .await
      .into_state();

    let output = render_state(&state, |summary| {
      dashboard::render_dashboard(profile.as_ref(), summary)
    });
    Ok(Outcome::from_state(&state, output))
  }

  async fn categories(&self, args: &CategoryArgs) -> Outcome {
    let state = Query::new("waste categories")
      .run(self.client.waste_categories())
      .await
      .into_state();

    let filter = CategoryFilter::from(args);
    let output = render_state(&state, |all| {
      categories::render_category_list(&filter.apply(all), all.len())
    });
    Outcome::from_state(&state, output)
  }

  async fn guidelines(&self, args: &GuidelineArgs) -> Outcome {
    let state = Query::new("disposal guidelines")
      .run(self.client.disposal_guidelines())
      .await
      .into_state();

    let filter = GuidelineFilter::from(args);
    let output = render_state(&state, |all| {
      guidelines::render_guideline_list(&filter.apply(all), &guideline_categories(all), all.len())
    });
    Outcome::from_state(&state, output)
  }

  async fn centers(&self, args: &CenterArgs) -> Outcome {
    let query = Query::new("recycling centers");
    let query = match &args.waste_category {
      Some(category_id) => {
        query
          .run(self.client.recycling_centers_for_category(category_id))
          .await
      }
      None => query.run(self.client.recycling_centers()).await,
    };
    let state = query.into_state();

    let filter = CenterFilter::from(args);
    let output = render_state(&state, |all| {
      centers::render_center_list(&filter.apply(all), all.len())
    });
    Outcome::from_state(&state, output)
  }
}

/// Message for a pending redirect to the login page.
fn login_notice(route: &Route) -> String {
  match route {
    Route::Login { expired: true } => {
      "Your session has expired, please log in again: wastesort login <username>\n".to_string()
    }
    _ => "Please log in first: wastesort login <username>\n".to_string(),
  }
}

/// Password from `--password` / WASTESORT_PASSWORD, otherwise one line of stdin.
async fn resolve_password(given: Option<String>) -> Result<String> {
  if let Some(password) = given {
    return Ok(password);
  }

  let mut stderr = tokio::io::stderr();
  stderr.write_all(b"Password: ").await?;
  stderr.flush().await?;

  let mut line = String::new();
  BufReader::new(tokio::io::stdin())
    .read_line(&mut line)
    .await?;
  let password = line.trim_end_matches(['\r', '\n']).to_string();
  if password.is_empty() {
    return Err(eyre!("No password given"));
  }
  info!("Read password from stdin");
  Ok(password)
}
