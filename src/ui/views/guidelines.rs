use std::fmt::Write;

use crate::api::types::DisposalGuideline;
use crate::ui::renderfns::{field, or_dash, section, title, truncate};

pub const NOT_FOUND: &str = "Disposal guideline not found.";

/// Filtered list of guidelines, with the categories available for `--category`.
pub fn render_guideline_list(
  guidelines: &[&DisposalGuideline],
  categories: &[&str],
  total: usize,
) -> String {
  let mut out = String::new();
  title(
    &mut out,
    &format!("Disposal Guidelines ({} of {})", guidelines.len(), total),
  );
  if !categories.is_empty() {
    let _ = writeln!(out, "Categories: {}", categories.join(", "));
  }

  if guidelines.is_empty() {
    let _ = writeln!(out, "No disposal guidelines found.");
    return out;
  }

  for guideline in guidelines {
    let _ = write!(out, "[{}] {}", guideline.id, guideline.title);
    if !guideline.waste_category.is_empty() {
      let _ = write!(out, " <{}>", guideline.waste_category);
    }
    let _ = writeln!(out);
    if !guideline.description.is_empty() {
      let _ = writeln!(out, "    {}", truncate(&guideline.description, 72));
    }
  }
  out
}

fn numbered(out: &mut String, heading: &str, items: &[String]) {
  if items.is_empty() {
    return;
  }
  section(out, heading);
  for (i, item) in items.iter().enumerate() {
    let _ = writeln!(out, "  {}. {}", i + 1, item);
  }
}

pub fn render_guideline_detail(guideline: &DisposalGuideline) -> String {
  let mut out = String::new();
  title(&mut out, &guideline.title);
  field(&mut out, "Category", &guideline.waste_category);
  field(&mut out, "Image", guideline.image_url.as_deref().unwrap_or(""));
  field(&mut out, "Video", guideline.video_url.as_deref().unwrap_or(""));
  field(&mut out, "Updated", guideline.updated_at.as_deref().unwrap_or(""));

  section(&mut out, "Description");
  let _ = writeln!(out, "{}", or_dash(&guideline.description));

  numbered(&mut out, "Steps", &guideline.steps);
  numbered(&mut out, "Tips", &guideline.tips);

  if !guideline.related_categories.is_empty() {
    section(&mut out, "Related Categories");
    let _ = writeln!(out, "{}", guideline.related_categories.join(", "));
  }
  out
}
