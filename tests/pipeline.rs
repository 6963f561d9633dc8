use bigdecimal::BigDecimal;
use sales_analytics_rust::models::{Dimension, FilterCriteria, Measure, Period, Selection};
use sales_analytics_rust::service::{filter, goals, grouping, metrics, ranking};
use sales_analytics_rust::source::{read_dataset, Clock, FixedClock};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::str::FromStr;

const DATA: &str = "\
invoice_id,emitted_at,seller,client,product,product_line,quantity,unit_value,total_item_value,purchase_cost,profit_value,invoice_total,month,year,status
1,03/06/2024 09:00:00,X,Clinic A,Gloves,Disposables,2,100.00,200.00,120.00,80.00,300.00,6,2024,Invoiced
1,03/06/2024 09:00:00,X,Clinic A,Masks,Disposables,1,100.00,100.00,50.00,50.00,300.00,6,2024,Invoiced
2,04/06/2024 11:30:00,X,Clinic B,Gloves,Disposables,2,100.00,200.00,110.00,90.00,200.00,6,2024,Invoiced
3,04/06/2024 12:00:00,Y,Clinic B,Syringe,Injectables,5,10.00,50.00,20.00,30.00,50.00,6,2024,Cancelled
4,10/05/2024 08:00:00,X,Clinic A,Gloves,Disposables,1,100.00,100.00,60.00,40.00,100.00,5,2024,Invoiced
";

fn dec(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).unwrap()
}

#[test]
fn end_to_end_two_invoices_for_seller() {
    let dataset = read_dataset(DATA.as_bytes()).unwrap();
    let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());

    let criteria = FilterCriteria::current(&clock).with_seller(Selection::Only("X".to_string()));
    let scope = filter::filter(&dataset, &criteria);
    let m = metrics::compute(&scope);

    assert_eq!(m.invoice_count, 2);
    assert_eq!(m.total_revenue, dec("500"));
    assert_eq!(m.average_ticket, dec("250"));
    assert_eq!(m.total_quantity, 5);
    assert_eq!(m.total_profit, dec("220"));
    assert_eq!(m.gross_margin_pct, dec("44"));
}

#[test]
fn clock_drives_default_period() {
    let dataset = read_dataset(DATA.as_bytes()).unwrap();
    let may = FixedClock(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    assert_eq!(may.today().to_string(), "2024-05-01");

    let scope = filter::filter(&dataset, &FilterCriteria::current(&may));
    let ids: Vec<i64> = scope.iter().map(|r| r.invoice_id).collect();
    assert_eq!(ids, vec![4]);
}

#[test]
fn seller_totals_feed_ranking_and_goals() {
    let dataset = read_dataset(DATA.as_bytes()).unwrap();
    let criteria = FilterCriteria::for_period(Period::new(6, 2024)).with_status(Selection::All);
    let scope = filter::filter(&dataset, &criteria);

    let by_seller = grouping::group_and_sum(&scope, Dimension::Seller);
    assert_eq!(by_seller.total(Measure::Revenue), metrics::compute(&scope).total_revenue);

    let ranked = ranking::top(&by_seller, Measure::Revenue, 1).unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].key.to_string(), "X");

    let table = sales_analytics_rust::models::SellerGoals::new([("X", dec("400"))]);
    let excluded: HashSet<String> = ["Y".to_string()].into_iter().collect();
    let perf = goals::evaluate(&by_seller, &table, &excluded).unwrap();
    assert_eq!(perf.len(), 1);
    assert_eq!(perf[0].attainment_pct, dec("125"));
}
