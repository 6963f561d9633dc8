use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 没有设定目标的销售员如何处理
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingGoalPolicy {
    /// 显示，目标与达成率为 0
    #[default]
    ShowZero,
    /// 不出现在业绩图中
    Exclude,
}

/// 销售员目标表 (静态配置，由调用方提供)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SellerGoals {
    pub targets: BTreeMap<String, BigDecimal>,
    pub missing_goal: MissingGoalPolicy,
}

impl SellerGoals {
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = (S, BigDecimal)>,
        S: Into<String>,
    {
        Self {
            targets: targets.into_iter().map(|(s, g)| (s.into(), g)).collect(),
            ..Self::default()
        }
    }

    pub fn with_missing_goal(mut self, policy: MissingGoalPolicy) -> Self {
        self.missing_goal = policy;
        self
    }

    /// 未配置目标时返回 0
    pub fn goal_for(&self, seller: &str) -> BigDecimal {
        self.targets
            .get(seller)
            .cloned()
            .unwrap_or_else(BigDecimal::zero)
    }
}

/// 销售员目标达成
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalPerformance {
    pub seller: String,
    pub total: BigDecimal,
    pub goal: BigDecimal,
    /// 达成率 (%)，保留两位小数
    pub attainment_pct: BigDecimal,
}
