use serde::{Deserialize, Serialize};

use crate::models::{FilterCriteria, GoalPerformance, MetricSnapshot, RankedEntry, SeriesPoint};

/// 指标卡片
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCards {
    pub metrics: MetricSnapshot,
    pub revenue_display: String,
    pub average_ticket_display: String,
    pub cost_display: String,
    pub profit_display: String,
}

/// 产品线占比
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineShare {
    pub point: SeriesPoint,
    pub share_pct: bigdecimal::BigDecimal,
}

/// 一次仪表盘计算的全部数据 (交给渲染层)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub criteria: FilterCriteria,
    pub cards: MetricCards,
    pub daily_sales: Vec<SeriesPoint>,
    pub sales_by_seller: Vec<SeriesPoint>,
    pub top_products: Vec<SeriesPoint>,
    pub sales_by_line: Vec<LineShare>,
    pub average_ticket_by_seller: Vec<SeriesPoint>,
    pub top_clients: Vec<RankedEntry>,
    pub top_clients_series: Vec<SeriesPoint>,
    pub goal_performance: Vec<GoalPerformance>,
}
