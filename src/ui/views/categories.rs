use std::fmt::Write;

use crate::api::types::WasteCategory;
use crate::ui::renderfns::{field, or_dash, section, title, truncate, yes_no};

pub const NOT_FOUND: &str = "Waste category not found.";

fn recyclable_label(category: &WasteCategory) -> &'static str {
  if category.recyclable {
    "Recyclable"
  } else {
    "Non-recyclable"
  }
}

/// Filtered list of categories. `total` is the count before filtering.
pub fn render_category_list(categories: &[&WasteCategory], total: usize) -> String {
  let mut out = String::new();
  title(
    &mut out,
    &format!("Waste Categories ({} of {})", categories.len(), total),
  );

  if categories.is_empty() {
    let _ = writeln!(out, "No waste categories found.");
    return out;
  }

  for category in categories {
    let _ = writeln!(
      out,
      "[{}] {} ({})",
      category.id,
      category.name,
      recyclable_label(category)
    );
    if !category.description.is_empty() {
      let _ = writeln!(out, "    {}", truncate(&category.description, 72));
    }
  }
  out
}

pub fn render_category_detail(category: &WasteCategory) -> String {
  let mut out = String::new();
  title(&mut out, &category.name);
  field(&mut out, "Id", &category.id);
  field(&mut out, "Recyclable", yes_no(category.recyclable));

  section(&mut out, "Description");
  let _ = writeln!(out, "{}", or_dash(&category.description));

  section(&mut out, "Disposal Methods");
  if category.disposal_methods.is_empty() {
    let _ = writeln!(out, "No disposal methods listed.");
  }
  for method in &category.disposal_methods {
    let _ = writeln!(out, "  * {}", method);
  }
  let _ = writeln!(
    out,
    "\nSee: wastesort centers --waste-category {}",
    category.id
  );
  out
}
