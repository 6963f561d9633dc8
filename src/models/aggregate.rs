use bigdecimal::{BigDecimal, Zero};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::{Dimension, GroupKey, Measure};

/// 单个字段的聚合方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    Sum,
    Mean,
    Min,
    Max,
    /// 行数 (与字段取值无关)
    Count,
}

/// 聚合方案：输出字段 -> 聚合方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregations {
    fields: IndexMap<Measure, Aggregation>,
}

impl Aggregations {
    /// 空方案，配合 `with` 使用
    pub fn empty() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    pub fn with(mut self, measure: Measure, aggregation: Aggregation) -> Self {
        self.fields.insert(measure, aggregation);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Measure, Aggregation)> + '_ {
        self.fields.iter().map(|(m, a)| (*m, *a))
    }
}

impl Default for Aggregations {
    /// 默认：收入/成本/利润求和
    fn default() -> Self {
        Self::empty()
            .with(Measure::Revenue, Aggregation::Sum)
            .with(Measure::Cost, Aggregation::Sum)
            .with(Measure::Profit, Aggregation::Sum)
    }
}

/// 单组的聚合值
pub type FieldValues = IndexMap<Measure, BigDecimal>;

/// 分组聚合结果
///
/// 键按首次出现顺序保存；没有数据的组不会出现 (不补零)。
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAggregate {
    pub dimension: Dimension,
    groups: IndexMap<GroupKey, FieldValues>,
}

impl GroupAggregate {
    pub(crate) fn new(dimension: Dimension, groups: IndexMap<GroupKey, FieldValues>) -> Self {
        Self { dimension, groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &GroupKey) -> Option<&FieldValues> {
        self.groups.get(key)
    }

    pub fn value(&self, key: &GroupKey, measure: Measure) -> Option<&BigDecimal> {
        self.groups.get(key).and_then(|values| values.get(&measure))
    }

    /// 首次出现顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &FieldValues)> {
        self.groups.iter()
    }

    /// 某字段在所有组上的合计
    pub fn total(&self, measure: Measure) -> BigDecimal {
        let mut total = BigDecimal::zero();
        for value in self.groups.values().filter_map(|v| v.get(&measure)) {
            total += value;
        }
        total
    }

    /// 是否聚合过该字段 (空结果视为包含)
    pub fn has_measure(&self, measure: Measure) -> bool {
        self.groups
            .values()
            .next()
            .map_or(true, |values| values.contains_key(&measure))
    }

    /// 按键排序 (如日销售图按日期升序)
    pub fn sorted_by_key(mut self) -> Self {
        self.groups.sort_keys();
        self
    }
}

/// 排名结果项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 从 1 开始的连续名次
    pub rank: usize,
    pub key: GroupKey,
    pub value: BigDecimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_aggregations_sum_money_fields() {
        let fields: Vec<_> = Aggregations::default().iter().collect();
        assert_eq!(
            fields,
            vec![
                (Measure::Revenue, Aggregation::Sum),
                (Measure::Cost, Aggregation::Sum),
                (Measure::Profit, Aggregation::Sum),
            ]
        );
    }
}
