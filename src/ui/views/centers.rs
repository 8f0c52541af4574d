use std::fmt::Write;

use crate::api::types::RecyclingCenter;
use crate::ui::renderfns::{field, section, title};

pub const NOT_FOUND: &str = "Recycling center not found.";

fn status_label(center: &RecyclingCenter) -> &'static str {
  if center.active {
    "Active"
  } else {
    "Inactive"
  }
}

/// Filtered list of centers. `total` is the count before filtering.
pub fn render_center_list(centers: &[&RecyclingCenter], total: usize) -> String {
  let mut out = String::new();
  title(
    &mut out,
    &format!("Recycling Centers ({} of {})", centers.len(), total),
  );

  if centers.is_empty() {
    let _ = writeln!(out, "No recycling centers found.");
    return out;
  }

  for center in centers {
    let _ = writeln!(out, "[{}] {} ({})", center.id, center.name, status_label(center));
    if !center.address.is_empty() {
      let _ = writeln!(out, "    {}", center.address);
    }
  }
  out
}

pub fn render_center_detail(center: &RecyclingCenter) -> String {
  let mut out = String::new();
  title(&mut out, &center.name);
  field(&mut out, "Status", status_label(center));
  field(&mut out, "Address", &center.address);
  field(&mut out, "Phone", &center.contact_number);
  field(&mut out, "Email", &center.email);
  field(&mut out, "Website", &center.website);
  field(&mut out, "Hours", &center.operating_hours);
  field(&mut out, "Notes", center.notes.as_deref().unwrap_or(""));

  section(&mut out, "Accepted Waste Categories");
  if center.accepted_waste_categories.is_empty() {
    let _ = writeln!(out, "No specific categories listed.");
  }
  for category in &center.accepted_waste_categories {
    let _ = writeln!(out, "  * {}", category);
  }

  section(&mut out, "Location");
  match (center.latitude, center.longitude) {
    (Some(lat), Some(lon)) => {
      let _ = writeln!(out, "{:.5}, {:.5}", lat, lon);
    }
    _ => {
      let _ = writeln!(out, "No map coordinates available for this recycling center.");
    }
  }
  out
}
