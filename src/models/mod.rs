pub mod aggregate;
pub mod dashboard;
pub mod goal;
pub mod metrics;
pub mod record;
pub mod scope;
pub mod series;

pub use aggregate::{Aggregation, Aggregations, FieldValues, GroupAggregate, RankedEntry};
pub use dashboard::{DashboardView, LineShare, MetricCards};
pub use goal::{GoalPerformance, MissingGoalPolicy, SellerGoals};
pub use metrics::MetricSnapshot;
pub use record::{Dataset, Dimension, GroupKey, Measure, SalesLineItem};
pub use scope::{FilterCriteria, Period, ScopedDataset, Selection, ALL, INVOICED};
pub use series::SeriesPoint;
