//! Report endpoints. Reports are always fetched fresh.

use clap::ValueEnum;

use crate::error::Result;

use super::cached_client::WasteClient;
use super::payload::{list_or_default, object_or_default};
use super::types::{ComprehensiveReport, RecyclableSplit, ReportRow};

/// Which report to fetch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
  #[default]
  Comprehensive,
  ByCategory,
  ByLocation,
  ByStatus,
  Recyclable,
}

impl ReportKind {
  fn segment(self) -> &'static str {
    match self {
      Self::Comprehensive => "comprehensive",
      Self::ByCategory => "by-category",
      Self::ByLocation => "by-location",
      Self::ByStatus => "by-status",
      Self::Recyclable => "recyclable-vs-non-recyclable",
    }
  }

  pub fn title(self) -> &'static str {
    match self {
      Self::Comprehensive => "Comprehensive report",
      Self::ByCategory => "Collections by category",
      Self::ByLocation => "Collections by location",
      Self::ByStatus => "Collections by status",
      Self::Recyclable => "Recyclable vs non-recyclable",
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Report {
  Comprehensive(ComprehensiveReport),
  Rows(ReportKind, Vec<ReportRow>),
  Recyclable(RecyclableSplit),
}

impl WasteClient {
  pub async fn comprehensive_report(&self) -> Result<ComprehensiveReport> {
    let kind = ReportKind::Comprehensive;
    let payload = self.api().get(&["reports", kind.segment()]).await?;
    Ok(object_or_default(payload, kind.segment()))
  }

  pub async fn report_by_category(&self) -> Result<Vec<ReportRow>> {
    self.report_rows(ReportKind::ByCategory).await
  }

  pub async fn report_by_location(&self) -> Result<Vec<ReportRow>> {
    self.report_rows(ReportKind::ByLocation).await
  }

  pub async fn report_by_status(&self) -> Result<Vec<ReportRow>> {
    self.report_rows(ReportKind::ByStatus).await
  }

  pub async fn recyclable_split(&self) -> Result<RecyclableSplit> {
    let kind = ReportKind::Recyclable;
    let payload = self.api().get(&["reports", kind.segment()]).await?;
    Ok(object_or_default(payload, kind.segment()))
  }

  /// Fetch the report of the given kind.
  pub async fn report(&self, kind: ReportKind) -> Result<Report> {
    Ok(match kind {
      ReportKind::Comprehensive => Report::Comprehensive(self.comprehensive_report().await?),
      ReportKind::ByCategory => Report::Rows(kind, self.report_by_category().await?),
      ReportKind::ByLocation => Report::Rows(kind, self.report_by_location().await?),
      ReportKind::ByStatus => Report::Rows(kind, self.report_by_status().await?),
      ReportKind::Recyclable => Report::Recyclable(self.recyclable_split().await?),
    })
  }

  async fn report_rows(&self, kind: ReportKind) -> Result<Vec<ReportRow>> {
    let payload = self.api().get(&["reports", kind.segment()]).await?;
    Ok(list_or_default(payload, kind.segment()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::cached_client::tests::test_waste_client;
  use crate::session::Route;
  use mockito::Server;

  #[tokio::test]
  async fn test_comprehensive_report() {
    let mut server = Server::new_async().await;
    let _mock = server
      .mock("GET", "/reports/comprehensive")
      .with_status(200)
      .with_body(
        r#"{
          "byCategory": [{"categoryName":"Glass","count":12,"percentage":60.0}],
          "byLocation": [{"location":"Downtown","count":20}],
          "byStatus": null,
          "recyclableVsNonRecyclable": {"recyclable":15,"nonRecyclable":5,
            "recyclablePercentage":75.0,"nonRecyclablePercentage":25.0},
          "totalCollections": 20
        }"#,
      )
      .create_async()
      .await;

    let client = test_waste_client(&server.url(), Route::Reports);
    let report = client.comprehensive_report().await.unwrap();

    assert_eq!(report.total_collections, 20);
    assert_eq!(report.by_category[0].label(), "Glass");
    assert!(report.by_status.is_empty());
    assert_eq!(report.recyclable_vs_non_recyclable.unwrap().recyclable, 15);
  }

  #[tokio::test]
  async fn test_comprehensive_report_with_fractional_count() {
    let mut server = Server::new_async().await;
    let _mock = server
      .mock("GET", "/reports/comprehensive")
      .with_status(200)
      .with_body(
        r#"{
          "byCategory": [{"categoryName":"Glass","count":12.0}, {"count":"many"}],
          "byLocation": [{"location":"Downtown","count":20}],
          "totalCollections": 20
        }"#,
      )
      .create_async()
      .await;

    let client = test_waste_client(&server.url(), Route::Reports);
    let report = client.comprehensive_report().await.unwrap();

    assert_eq!(report.total_collections, 20);
    assert_eq!(report.by_location.len(), 1);
    assert_eq!(report.by_category.len(), 2);
    assert_eq!(report.by_category[0].count, 12);
  }

  #[tokio::test]
  async fn test_report_dispatch_and_fallbacks() {
    let mut server = Server::new_async().await;
    let _status = server
      .mock("GET", "/reports/by-status")
      .with_status(200)
      .with_body(r#"[{"status":"COLLECTED","count":3},{"status":"PENDING","count":1}]"#)
      .create_async()
      .await;
    let _split = server
      .mock("GET", "/reports/recyclable-vs-non-recyclable")
      .with_status(200)
      .with_body("\"not an object\"")
      .create_async()
      .await;

    let client = test_waste_client(&server.url(), Route::Reports);

    match client.report(ReportKind::ByStatus).await.unwrap() {
      Report::Rows(kind, rows) => {
        assert_eq!(kind, ReportKind::ByStatus);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].label(), "PENDING");
      }
      other => panic!("unexpected report: {:?}", other),
    }

    assert_eq!(
      client.report(ReportKind::Recyclable).await.unwrap(),
      Report::Recyclable(RecyclableSplit::default())
    );
  }

  #[tokio::test]
  async fn test_reports_are_not_cached() {
    let mut server = Server::new_async().await;
    let mock = server
      .mock("GET", "/reports/by-location")
      .with_status(200)
      .with_body("[]")
      .expect(2)
      .create_async()
      .await;

    let client = test_waste_client(&server.url(), Route::Reports);
    client.report_by_location().await.unwrap();
    client.report_by_location().await.unwrap();

    mock.assert_async().await;
  }
}
