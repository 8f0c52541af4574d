use std::fmt::Write;

use crate::api::types::{ComprehensiveReport, RecyclableSplit, ReportRow};
use crate::api::{Report, ReportKind};
use crate::ui::renderfns::{percent, section, title};

fn rows(out: &mut String, rows: &[ReportRow]) {
  if rows.is_empty() {
    let _ = writeln!(out, "No data available.");
    return;
  }
  for row in rows {
    let share = row.percentage.map(percent).unwrap_or_default();
    let _ = writeln!(out, "{:<28}{:>8}{:>9}", row.label(), row.count, share);
  }
}

fn split(out: &mut String, split: &RecyclableSplit) {
  let _ = writeln!(
    out,
    "Recyclable:       {} items ({})",
    split.recyclable,
    percent(split.recyclable_percentage)
  );
  let _ = writeln!(
    out,
    "Non-recyclable:   {} items ({})",
    split.non_recyclable,
    percent(split.non_recyclable_percentage)
  );
}

fn comprehensive(out: &mut String, report: &ComprehensiveReport) {
  let _ = writeln!(out, "Total collections: {}", report.total_collections);

  if let Some(s) = &report.recyclable_vs_non_recyclable {
    section(out, ReportKind::Recyclable.title());
    split(out, s);
  }
  section(out, ReportKind::ByCategory.title());
  rows(out, &report.by_category);
  section(out, ReportKind::ByLocation.title());
  rows(out, &report.by_location);
  section(out, ReportKind::ByStatus.title());
  rows(out, &report.by_status);
}

pub fn render_report(report: &Report) -> String {
  let mut out = String::new();
  title(&mut out, "Waste Management Reports");

  match report {
    Report::Comprehensive(r) => comprehensive(&mut out, r),
    Report::Rows(kind, r) => {
      section(&mut out, kind.title());
      rows(&mut out, r);
    }
    Report::Recyclable(s) => {
      section(&mut out, ReportKind::Recyclable.title());
      split(&mut out, s);
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn row(status: &str, count: u64, percentage: f64) -> ReportRow {
    ReportRow {
      status: Some(status.into()),
      count,
      percentage: Some(percentage),
      ..Default::default()
    }
  }

  #[test]
  fn test_rows_report() {
    let report = Report::Rows(
      ReportKind::ByStatus,
      vec![row("COLLECTED", 3, 75.0), row("PENDING", 1, 25.0)],
    );
    let out = render_report(&report);
    assert!(out.contains("Collections by status\n"));
    assert!(out.contains(&format!("{:<28}{:>8}{:>9}\n", "COLLECTED", 3, "75.0%")));
  }

  #[test]
  fn test_empty_comprehensive_report() {
    let out = render_report(&Report::Comprehensive(ComprehensiveReport::default()));
    assert!(out.contains("Total collections: 0\n"));
    assert_eq!(out.matches("No data available.").count(), 3);
    assert!(!out.contains("Recyclable vs non-recyclable"));
  }
}
