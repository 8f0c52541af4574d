use std::fmt::Write;

use crate::session::Route;

/// Header line with app name, API host and current page
pub fn render_header(api_url: &str, route: &Route) -> String {
  format!("wastesort | {} | {}\n", extract_domain(api_url), route)
}

/// Page title, underlined
pub fn title(out: &mut String, text: &str) {
  let _ = writeln!(out, "{}", text);
  let _ = writeln!(out, "{}", "=".repeat(text.chars().count()));
}

/// Section heading inside a page, preceded by a blank line
pub fn section(out: &mut String, text: &str) {
  let _ = writeln!(out);
  let _ = writeln!(out, "{}", text);
  let _ = writeln!(out, "{}", "-".repeat(text.chars().count()));
}

/// Extract domain from the API URL
fn extract_domain(url: &str) -> &str {
  url
    .strip_prefix("https://")
    .or_else(|| url.strip_prefix("http://"))
    .unwrap_or(url)
    .split('/')
    .next()
    .unwrap_or(url)
}
