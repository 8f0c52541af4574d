use std::fmt::Write;

use crate::api::types::{UserProfile, WasteCategory};
use crate::ui::renderfns::{field, section, title, truncate};

/// Number of categories featured on the dashboard
pub const FEATURED_CATEGORIES: usize = 3;

pub fn render_profile(profile: Option<&UserProfile>) -> String {
  let mut out = String::new();
  match profile {
    Some(user) => {
      title(&mut out, &user.username);
      field(&mut out, "Id", &user.id);
      field(&mut out, "Email", &user.email);
      field(&mut out, "Roles", &user.roles.join(", "));
    }
    None => {
      let _ = writeln!(out, "Not signed in.");
    }
  }
  out
}

/// Data behind the dashboard page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
  pub categories: Vec<WasteCategory>,
  pub centers: usize,
  pub guidelines: usize,
}

pub fn render_dashboard(profile: Option<&UserProfile>, summary: &DashboardSummary) -> String {
  let mut out = String::new();
  let categories = &summary.categories;
  let name = profile.map(|p| p.username.as_str()).unwrap_or("there");
  title(&mut out, &format!("Welcome, {}!", name));

  section(&mut out, "Recent Waste Categories");
  if categories.is_empty() {
    let _ = writeln!(out, "No waste categories found.");
  }
  for category in categories.iter().take(FEATURED_CATEGORIES) {
    let _ = writeln!(out, "[{}] {}", category.id, category.name);
    if !category.description.is_empty() {
      let _ = writeln!(out, "    {}", truncate(&category.description, 72));
    }
  }

  section(&mut out, "Explore");
  let _ = writeln!(
    out,
    "  categories   {:>4}  Learn about types of waste",
    categories.len()
  );
  let _ = writeln!(
    out,
    "  centers      {:>4}  Find recycling centers near you",
    summary.centers
  );
  let _ = writeln!(
    out,
    "  guidelines   {:>4}  How to dispose of waste properly",
    summary.guidelines
  );
  let _ = writeln!(out, "  reports            Waste management statistics");
  out
}
