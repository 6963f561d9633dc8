use bigdecimal::BigDecimal;

use crate::format::CurrencyFormatter;
use crate::models::{GoalPerformance, GroupAggregate, Measure, RankedEntry, SeriesPoint};

/// 可转换为图表数据点的条目
pub trait SeriesSource {
    fn label(&self) -> String;
    fn value(&self) -> &BigDecimal;
}

impl SeriesSource for RankedEntry {
    fn label(&self) -> String {
        self.key.to_string()
    }

    fn value(&self) -> &BigDecimal {
        &self.value
    }
}

impl SeriesSource for GoalPerformance {
    fn label(&self) -> String {
        self.seller.clone()
    }

    fn value(&self) -> &BigDecimal {
        &self.total
    }
}

/// 截断时追加的省略号
pub const ELLIPSIS: &str = "...";

/// 图表截断标签
pub struct Labeled<'a, T> {
    pub entry: &'a T,
    /// 按字符计的最大长度 (不含省略号)
    pub max_len: usize,
    /// 仅在实际截断时追加 `ELLIPSIS`
    pub ellipsis: bool,
}

impl<T: SeriesSource> SeriesSource for Labeled<'_, T> {
    fn label(&self) -> String {
        let full = self.entry.label();
        match full.char_indices().nth(self.max_len) {
            Some((cut, _)) if self.ellipsis => format!("{}{}", &full[..cut], ELLIPSIS),
            Some((cut, _)) => full[..cut].to_string(),
            None => full,
        }
    }

    fn value(&self) -> &BigDecimal {
        self.entry.value()
    }
}

/// 整形为 (标签, 数值, 展示值)；不排序、不过滤，展示值交给注入的格式化器
pub fn to_series<I>(entries: I, formatter: &dyn CurrencyFormatter) -> Vec<SeriesPoint>
where
    I: IntoIterator,
    I::Item: SeriesSource,
{
    entries
        .into_iter()
        .map(|entry| {
            let value = entry.value().clone();
            SeriesPoint {
                label: entry.label(),
                display: formatter.format(Some(&value)),
                value,
            }
        })
        .collect()
}

/// 带标签截断的排名序列
pub fn ranked_series(
    entries: &[RankedEntry],
    max_len: usize,
    ellipsis: bool,
    formatter: &dyn CurrencyFormatter,
) -> Vec<SeriesPoint> {
    to_series(
        entries.iter().map(|entry| Labeled {
            entry,
            max_len,
            ellipsis,
        }),
        formatter,
    )
}

/// 分组结果某字段的序列 (保持分组顺序)；未聚合该字段的组跳过
pub fn aggregate_series(
    aggregate: &GroupAggregate,
    measure: Measure,
    formatter: &dyn CurrencyFormatter,
) -> Vec<SeriesPoint> {
    aggregate
        .iter()
        .filter_map(|(key, values)| {
            values.get(&measure).map(|value| SeriesPoint {
                label: key.to_string(),
                value: value.clone(),
                display: formatter.format(Some(value)),
            })
        })
        .collect()
}

impl<T: SeriesSource> SeriesSource for &T {
    fn label(&self) -> String {
        (**self).label()
    }

    fn value(&self) -> &BigDecimal {
        (**self).value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::BrlFormatter;
    use crate::models::record::fixtures::dec;
    use crate::models::GroupKey;

    struct Plain;

    impl CurrencyFormatter for Plain {
        fn format(&self, value: Option<&BigDecimal>) -> String {
            value.map(|v| format!("<{}>", v)).unwrap_or_default()
        }
    }

    fn entries() -> Vec<RankedEntry> {
        vec![
            RankedEntry { rank: 1, key: GroupKey::from("Hospital Central"), value: dec("300") },
            RankedEntry { rank: 2, key: GroupKey::Number(7), value: dec("1200.5") },
        ]
    }

    #[test]
    fn test_series_keeps_order_and_delegates_formatting() {
        let series = to_series(&entries(), &Plain);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "Hospital Central");
        assert_eq!(series[0].display, "<300>");
        assert_eq!(series[1].label, "7");
        assert_eq!(series[1].value, dec("1200.5"));
    }

    #[test]
    fn test_ranked_series_truncates_labels() {
        let series = ranked_series(&entries(), 8, false, &BrlFormatter::default());
        assert_eq!(series[0].label, "Hospital");
        assert_eq!(series[1].display, "R$ 1.200,50");
    }

    #[test]
    fn test_ellipsis_only_when_label_is_cut() {
        let series = ranked_series(&entries(), 8, true, &Plain);
        assert_eq!(series[0].label, "Hospital...");
        assert_eq!(series[1].label, "7");

        let exact = ranked_series(&entries(), 16, true, &Plain);
        assert_eq!(exact[0].label, "Hospital Central");
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let entries = vec![RankedEntry {
            rank: 1,
            key: GroupKey::from("Farmácia São João Ltda"),
            value: dec("1"),
        }];
        let series = ranked_series(&entries, 8, false, &Plain);
        assert_eq!(series[0].label, "Farmácia");
        let series = ranked_series(&entries, 12, true, &Plain);
        assert_eq!(series[0].label, "Farmácia São...");
    }

    #[test]
    fn test_goal_series_uses_total() {
        let perf = vec![GoalPerformance {
            seller: "Ana".to_string(),
            total: dec("10"),
            goal: dec("20"),
            attainment_pct: dec("50"),
        }];
        let series = to_series(&perf, &Plain);
        assert_eq!(series[0].label, "Ana");
        assert_eq!(series[0].value, dec("10"));
    }
}
