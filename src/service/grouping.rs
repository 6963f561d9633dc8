use bigdecimal::{BigDecimal, Zero};
use indexmap::IndexMap;

use crate::models::{
    Aggregation, Aggregations, Dimension, FieldValues, GroupAggregate, GroupKey, Measure,
    ScopedDataset,
};

/// 单组单字段的累加器
#[derive(Debug, Clone)]
struct Accumulator {
    sum: BigDecimal,
    count: u64,
    min: Option<BigDecimal>,
    max: Option<BigDecimal>,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            sum: BigDecimal::zero(),
            count: 0,
            min: None,
            max: None,
        }
    }

    fn push(&mut self, value: BigDecimal) {
        self.sum += &value;
        self.count += 1;
        if self.min.as_ref().map_or(true, |m| value < *m) {
            self.min = Some(value.clone());
        }
        if self.max.as_ref().map_or(true, |m| value > *m) {
            self.max = Some(value);
        }
    }

    fn finish(self, aggregation: Aggregation) -> BigDecimal {
        match aggregation {
            Aggregation::Sum => self.sum,
            Aggregation::Mean if self.count == 0 => BigDecimal::zero(),
            Aggregation::Mean => self.sum / BigDecimal::from(self.count),
            Aggregation::Min => self.min.unwrap_or_else(BigDecimal::zero),
            Aggregation::Max => self.max.unwrap_or_else(BigDecimal::zero),
            Aggregation::Count => BigDecimal::from(self.count),
        }
    }
}

/// 按维度分组聚合
///
/// 组按首次出现顺序保存。引擎本身不去重：发票级指标请先传入
/// `ScopedDataset::unique_invoices()` 的结果。
pub fn group_by(
    scope: &ScopedDataset<'_>,
    dimension: Dimension,
    aggregations: &Aggregations,
) -> GroupAggregate {
    let mut acc: IndexMap<GroupKey, Vec<(Measure, Aggregation, Accumulator)>> = IndexMap::new();

    for item in scope.iter() {
        let fields = acc.entry(item.key(dimension)).or_insert_with(|| {
            aggregations
                .iter()
                .map(|(m, a)| (m, a, Accumulator::new()))
                .collect()
        });
        for (measure, _, accumulator) in fields.iter_mut() {
            accumulator.push(item.measure(*measure));
        }
    }

    let groups = acc
        .into_iter()
        .map(|(key, fields)| {
            let values: FieldValues = fields
                .into_iter()
                .map(|(measure, aggregation, accumulator)| {
                    (measure, accumulator.finish(aggregation))
                })
                .collect();
            (key, values)
        })
        .collect();

    GroupAggregate::new(dimension, groups)
}

/// 默认聚合 (收入/成本/利润求和)
pub fn group_and_sum(scope: &ScopedDataset<'_>, dimension: Dimension) -> GroupAggregate {
    group_by(scope, dimension, &Aggregations::default())
}
