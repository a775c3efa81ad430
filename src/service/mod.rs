pub mod analytics;
pub mod catalog;
pub mod clients;
mod pdf;
pub mod reports;

pub use analytics::DashboardAnalytics;
pub use catalog::{ProductCatalog, ALL_CATEGORIES};
pub use clients::ClientDirectory;
pub use reports::ReportData;
