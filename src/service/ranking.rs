use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::{GroupAggregate, Measure, RankedEntry};

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Descending,
    Ascending,
}

/// 对分组结果排序并截取前 N 名
///
/// 稳定排序：取值相同时保持分组的首次出现顺序。截取后重新编号 1..=N，
/// `top_n == 0` 返回空列表，超出组数时返回全部 (不补位)。
pub fn rank(
    aggregate: &GroupAggregate,
    by: Measure,
    top_n: usize,
    order: SortOrder,
) -> AnalyticsResult<Vec<RankedEntry>> {
    if !aggregate.has_measure(by) {
        return Err(AnalyticsError::MeasureNotAggregated(by));
    }

    let mut entries: Vec<_> = aggregate
        .iter()
        .filter_map(|(key, values)| values.get(&by).map(|value| (key, value)))
        .collect();

    // sort_by 为稳定排序
    match order {
        SortOrder::Descending => entries.sort_by(|a, b| b.1.cmp(a.1)),
        SortOrder::Ascending => entries.sort_by(|a, b| a.1.cmp(b.1)),
    }

    Ok(entries
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(idx, (key, value))| RankedEntry {
            rank: idx + 1,
            key: key.clone(),
            value: value.clone(),
        })
        .collect())
}

/// 降序取前 N 名
pub fn top(aggregate: &GroupAggregate, by: Measure, top_n: usize) -> AnalyticsResult<Vec<RankedEntry>> {
    rank(aggregate, by, top_n, SortOrder::Descending)
}
