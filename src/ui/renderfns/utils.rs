use std::fmt::Write;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

pub fn yes_no(value: bool) -> &'static str {
  if value {
    "Yes"
  } else {
    "No"
  }
}

/// Placeholder for empty text fields
pub fn or_dash(s: &str) -> &str {
  if s.trim().is_empty() {
    "-"
  } else {
    s
  }
}

pub fn percent(value: f64) -> String {
  format!("{:.1}%", value)
}

/// Write a `label: value` line, skipping empty values
pub fn field(out: &mut String, label: &str, value: &str) {
  if !value.trim().is_empty() {
    let _ = writeln!(out, "{:<18}{}", format!("{}:", label), value);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
  }

  #[test]
  fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
  }

  #[test]
  fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 8), "hello...");
  }

  #[test]
  fn test_truncate_multibyte() {
    assert_eq!(truncate("Glas und Flaschen für Altglas", 8), "Glas ...");
    assert_eq!(truncate("Verpackungsmüll", 12), "Verpackun...");
  }

  #[test]
  fn test_field_skips_empty() {
    let mut out = String::new();
    field(&mut out, "Email", "");
    field(&mut out, "Phone", "555-0100");
    assert_eq!(out, "Phone:            555-0100\n");
  }

  #[test]
  fn test_small_helpers() {
    assert_eq!(yes_no(true), "Yes");
    assert_eq!(or_dash("  "), "-");
    assert_eq!(percent(62.5), "62.5%");
  }
}
