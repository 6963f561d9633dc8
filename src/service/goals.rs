use bigdecimal::{BigDecimal, Zero};
use std::collections::HashSet;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::{GoalPerformance, GroupAggregate, Measure, MissingGoalPolicy, SellerGoals};

/// 销售员业绩对比目标
///
/// `per_seller_totals` 需含 `Revenue` 字段。输出保持分组顺序；
/// 目标为 0 (或未配置) 时达成率为 0。
pub fn evaluate(
    per_seller_totals: &GroupAggregate,
    goals: &SellerGoals,
    excluded_sellers: &HashSet<String>,
) -> AnalyticsResult<Vec<GoalPerformance>> {
    if !per_seller_totals.has_measure(Measure::Revenue) {
        return Err(AnalyticsError::MeasureNotAggregated(Measure::Revenue));
    }

    let mut out = Vec::with_capacity(per_seller_totals.len());
    for (key, values) in per_seller_totals.iter() {
        let seller = key.to_string();
        if excluded_sellers.contains(&seller) {
            continue;
        }
        if goals.missing_goal == MissingGoalPolicy::Exclude && !goals.targets.contains_key(&seller) {
            tracing::debug!("Seller {} has no goal, skipped", seller);
            continue;
        }

        let total = values
            .get(&Measure::Revenue)
            .cloned()
            .unwrap_or_else(BigDecimal::zero);
        let goal = goals.goal_for(&seller);
        let attainment_pct = attainment(&total, &goal);

        out.push(GoalPerformance {
            seller,
            total,
            goal,
            attainment_pct,
        });
    }

    Ok(out)
}

/// total / goal * 100，保留两位小数；goal <= 0 时为 0
pub fn attainment(total: &BigDecimal, goal: &BigDecimal) -> BigDecimal {
    if *goal <= BigDecimal::zero() {
        return BigDecimal::zero();
    }
    (total * BigDecimal::from(100) / goal).round(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::fixtures::{dec, item};
    use crate::models::{Dimension, FilterCriteria, Period};
    use crate::service::filter::filter;
    use crate::service::grouping::group_and_sum;

    fn seller_totals(rows: &[(&str, &str)]) -> GroupAggregate {
        let data: Vec<_> = rows
            .iter()
            .enumerate()
            .map(|(i, (seller, revenue))| item(i as i64 + 1, seller, revenue))
            .collect();
        let scope = filter(&data, &FilterCriteria::for_period(Period::new(5, 2024)));
        group_and_sum(&scope, Dimension::Seller)
    }

    #[test]
    fn test_attainment_over_goal() {
        assert_eq!(attainment(&dec("150000"), &dec("100000")), dec("150.0"));
        assert_eq!(attainment(&dec("1"), &dec("3")), dec("33.33"));
        assert!(attainment(&dec("500"), &dec("0")).is_zero());
    }

    #[test]
    fn test_evaluate_excludes_and_defaults_missing_goal() {
        let totals = seller_totals(&[("Ana", "150000"), ("House", "90000"), ("Caio", "100")]);
        let goals = SellerGoals::new([("Ana", dec("100000"))]);
        let excluded: HashSet<String> = ["House".to_string()].into_iter().collect();

        let perf = evaluate(&totals, &goals, &excluded).unwrap();
        assert_eq!(perf.len(), 2);
        assert_eq!(perf[0].seller, "Ana");
        assert_eq!(perf[0].attainment_pct, dec("150"));
        assert_eq!(perf[1].seller, "Caio");
        assert!(perf[1].goal.is_zero());
        assert!(perf[1].attainment_pct.is_zero());
    }

    #[test]
    fn test_missing_goal_can_be_excluded() {
        let totals = seller_totals(&[("Ana", "10"), ("Caio", "20")]);
        let goals = SellerGoals::new([("Ana", dec("20"))]).with_missing_goal(MissingGoalPolicy::Exclude);
        let perf = evaluate(&totals, &goals, &HashSet::new()).unwrap();
        assert_eq!(perf.len(), 1);
        assert_eq!(perf[0].attainment_pct, dec("50"));
    }
}
