use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

/// 指标快照 (每个过滤范围计算一次，不持久化)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub invoice_count: usize,
    pub total_quantity: u64,
    pub total_revenue: BigDecimal,
    pub total_cost: BigDecimal,
    pub total_profit: BigDecimal,
    /// 客单价 = 总额 / 发票数
    pub average_ticket: BigDecimal,
    /// 毛利率 (%)
    pub gross_margin_pct: BigDecimal,
}

impl Default for MetricSnapshot {
    fn default() -> Self {
        Self {
            invoice_count: 0,
            total_quantity: 0,
            total_revenue: BigDecimal::zero(),
            total_cost: BigDecimal::zero(),
            total_profit: BigDecimal::zero(),
            average_ticket: BigDecimal::zero(),
            gross_margin_pct: BigDecimal::zero(),
        }
    }
}
