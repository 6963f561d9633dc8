use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// 图表数据点 (标签, 数值, 展示字符串)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: BigDecimal,
    pub display: String,
}
