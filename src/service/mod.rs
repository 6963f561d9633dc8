pub mod dashboard;
pub mod filter;
pub mod goals;
pub mod grouping;
pub mod metrics;
pub mod ranking;
pub mod series;

pub use dashboard::{DashboardQuery, DashboardService};
pub use ranking::SortOrder;
