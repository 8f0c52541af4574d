//! Plain-text page rendering.

mod renderfns;
pub mod views;

use crate::query::QueryState;

pub use renderfns::render_header;

/// Render a settled page: the data through `render`, or the page's error.
pub fn render_state<T>(state: &QueryState<T>, render: impl FnOnce(&T) -> String) -> String {
  match state {
    QueryState::Loading => "Loading...\n".to_string(),
    QueryState::Success(data) => render(data),
    QueryState::Error(message) => format!("{}\n", message),
  }
}

/// Render a detail page, falling back to `not_found` for a missing record.
pub fn render_detail<T>(
  state: &QueryState<Option<T>>,
  not_found: &str,
  render: impl FnOnce(&T) -> String,
) -> String {
  render_state(state, |record| match record {
    Some(record) => render(record),
    None => format!("{}\n", not_found),
  })
}
