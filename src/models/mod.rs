pub mod client;
pub mod product;
pub mod report;
pub mod settings;

pub use client::{Client, ClientInput};
pub use product::{Product, ProductInput, MONTHS_PER_YEAR};
pub use report::{Report, ReportFormat, ReportKind, ReportRequest};
pub use settings::{Currency, DateFormat, Settings, SettingsPatch};
