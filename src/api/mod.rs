//! Waste sorting REST API.

mod auth;
mod cache;
mod cached_client;
pub mod client;
mod payload;
mod reports;
pub mod types;

pub use auth::Signup;
pub use cached_client::WasteClient;
pub use client::{ApiClient, DEFAULT_API_URL};
pub use reports::{Report, ReportKind};
