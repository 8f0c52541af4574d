pub mod categories;
pub mod centers;
pub mod dashboard;
pub mod guidelines;
pub mod reports;
