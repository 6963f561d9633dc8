pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod service;
pub mod source;

pub use config::AppConfig;
pub use error::{AnalyticsError, AnalyticsResult};
pub use format::{BrlFormatter, CurrencyFormatter};
pub use service::{DashboardQuery, DashboardService};
pub use source::{load_dataset, Clock, FixedClock, SystemClock};
