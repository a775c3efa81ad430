pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod seed;
pub mod service;
pub mod store;
pub mod table;

pub use api::router;
pub use config::AppConfig;
pub use error::{DashboardError, Result};
pub use store::{DashboardState, DashboardStore};
pub use table::{SortConfig, SortDirection, SortableAggregateTable};
