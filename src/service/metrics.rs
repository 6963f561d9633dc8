use bigdecimal::{BigDecimal, Zero};
use std::collections::HashSet;

use crate::models::{MetricSnapshot, ScopedDataset};

/// 计算过滤范围内的汇总指标
///
/// 分母为 0 时 (无发票、无收入) 对应比值为 0，不报错。
pub fn compute(scope: &ScopedDataset<'_>) -> MetricSnapshot {
    let mut invoices = HashSet::new();
    let mut snapshot = MetricSnapshot::default();

    for item in scope.iter() {
        invoices.insert(item.invoice_id);
        snapshot.total_quantity += item.quantity;
        snapshot.total_revenue += &item.total_item_value;
        snapshot.total_cost += &item.purchase_cost;
        snapshot.total_profit += &item.profit_value;
    }

    snapshot.invoice_count = invoices.len();
    if snapshot.invoice_count > 0 {
        snapshot.average_ticket =
            &snapshot.total_revenue / BigDecimal::from(snapshot.invoice_count as u64);
    }
    if snapshot.total_revenue > BigDecimal::zero() {
        snapshot.gross_margin_pct =
            &snapshot.total_profit * BigDecimal::from(100) / &snapshot.total_revenue;
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::fixtures::{dec, item};
    use crate::models::{FilterCriteria, Period, SalesLineItem};
    use crate::service::filter::filter;
    use proptest::prelude::*;

    fn scope_of(data: &[SalesLineItem]) -> ScopedDataset<'_> {
        filter(data, &FilterCriteria::for_period(Period::new(5, 2024)))
    }

    #[test]
    fn test_two_invoices_average_ticket() {
        let data = vec![item(1, "X", "100"), item(1, "X", "200"), item(2, "X", "200")];
        let m = compute(&scope_of(&data));
        assert_eq!(m.invoice_count, 2);
        assert_eq!(m.total_quantity, 3);
        assert_eq!(m.total_revenue, dec("500"));
        assert_eq!(m.average_ticket, dec("250"));
    }

    #[test]
    fn test_empty_scope_has_zero_ratios() {
        let data: Vec<SalesLineItem> = vec![];
        let m = compute(&scope_of(&data));
        assert_eq!(m, MetricSnapshot::default());
        assert!(m.average_ticket.is_zero());
        assert!(m.gross_margin_pct.is_zero());
    }

    #[test]
    fn test_gross_margin_pct() {
        let mut a = item(1, "X", "200");
        a.purchase_cost = dec("150");
        a.profit_value = dec("50");
        let m = compute(&scope_of(&[a]));
        assert_eq!(m.total_cost, dec("150"));
        assert_eq!(m.gross_margin_pct, dec("25"));
    }

    #[test]
    fn test_zero_revenue_margin_is_zero() {
        let a = item(1, "X", "0");
        let m = compute(&scope_of(&[a]));
        assert_eq!(m.invoice_count, 1);
        assert!(m.average_ticket.is_zero());
        assert!(m.gross_margin_pct.is_zero());
    }

    proptest! {
        /// Property: totals over non-negative rows are never negative.
        #[test]
        fn totals_are_non_negative(
            rows in prop::collection::vec((1i64..10, 0u32..10_000, 0u32..5_000, 0u64..50), 0..30)
        ) {
            let data: Vec<SalesLineItem> = rows
                .into_iter()
                .map(|(id, revenue, cost, qty)| {
                    let mut it = item(id, "X", &revenue.to_string());
                    it.purchase_cost = BigDecimal::from(cost);
                    it.quantity = qty;
                    it
                })
                .collect();
            let m = compute(&scope_of(&data));
            let zero = BigDecimal::zero();
            prop_assert!(m.total_revenue >= zero);
            prop_assert!(m.total_cost >= zero);
            prop_assert!(m.total_profit >= zero);
            prop_assert!(m.average_ticket >= zero);
            if m.invoice_count == 0 {
                prop_assert!(m.average_ticket.is_zero());
            }
        }
    }
}
