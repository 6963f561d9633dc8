use bigdecimal::{BigDecimal, Zero};
use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

use crate::error::{AnalyticsError, AnalyticsResult};

/// 销售明细行 (一张发票包含多行)
///
/// 发票级字段 (开票时间、销售员、发票总额、状态) 在同一发票的所有明细上必须一致，
/// 按发票去重依赖这一点。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesLineItem {
    pub invoice_id: i64,
    pub emitted_at: NaiveDateTime,
    pub seller: String,
    pub client: String,
    pub product: String,
    pub product_line: String,
    pub quantity: u64,
    pub unit_value: BigDecimal,
    pub total_item_value: BigDecimal,
    pub purchase_cost: BigDecimal,
    pub profit_value: BigDecimal,
    pub invoice_total: BigDecimal,
    pub month: u32,
    pub year: i32,
    pub status: String,
}

impl SalesLineItem {
    /// 按类型化字段读取数值
    pub fn measure(&self, measure: Measure) -> BigDecimal {
        match measure {
            Measure::Quantity => BigDecimal::from(self.quantity),
            Measure::UnitValue => self.unit_value.clone(),
            Measure::Revenue => self.total_item_value.clone(),
            Measure::Cost => self.purchase_cost.clone(),
            Measure::Profit => self.profit_value.clone(),
            Measure::InvoiceTotal => self.invoice_total.clone(),
        }
    }

    /// 按分组维度取键
    pub fn key(&self, dimension: Dimension) -> GroupKey {
        match dimension {
            Dimension::Seller => GroupKey::Text(self.seller.clone()),
            Dimension::Client => GroupKey::Text(self.client.clone()),
            Dimension::Product => GroupKey::Text(self.product.clone()),
            Dimension::ProductLine => GroupKey::Text(self.product_line.clone()),
            Dimension::Day => GroupKey::Number(i64::from(self.emitted_at.day())),
            Dimension::Invoice => GroupKey::Number(self.invoice_id),
        }
    }

    /// 校验金额非负、月份合法；`row` 仅用于错误定位
    pub fn validate(&self, row: usize) -> AnalyticsResult<()> {
        let monetary = [
            ("unit_value", &self.unit_value),
            ("total_item_value", &self.total_item_value),
            ("purchase_cost", &self.purchase_cost),
            ("profit_value", &self.profit_value),
            ("invoice_total", &self.invoice_total),
        ];
        for (field, value) in monetary {
            if *value < BigDecimal::zero() {
                return Err(AnalyticsError::InvalidRecord {
                    row,
                    reason: format!("{} must not be negative, got {}", field, value),
                });
            }
        }

        if !(1..=12).contains(&self.month) {
            return Err(AnalyticsError::InvalidRecord {
                row,
                reason: format!("month must be within 1..=12, got {}", self.month),
            });
        }

        Ok(())
    }
}

/// 数值字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Quantity,
    UnitValue,
    /// 明细总额 (Total Item Value)
    Revenue,
    Cost,
    Profit,
    InvoiceTotal,
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Measure::Quantity => "quantity",
            Measure::UnitValue => "unit_value",
            Measure::Revenue => "revenue",
            Measure::Cost => "cost",
            Measure::Profit => "profit",
            Measure::InvoiceTotal => "invoice_total",
        };
        f.write_str(name)
    }
}

/// 分组维度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Seller,
    Client,
    Product,
    ProductLine,
    /// 开票日 (月内第几天)
    Day,
    Invoice,
}

/// 分组键
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupKey {
    Number(i64),
    Text(String),
}

impl GroupKey {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            GroupKey::Text(s) => Some(s),
            GroupKey::Number(_) => None,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Number(n) => write!(f, "{}", n),
            GroupKey::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for GroupKey {
    fn from(value: &str) -> Self {
        GroupKey::Text(value.to_string())
    }
}

/// 已加载的完整数据快照 (只读)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    items: Vec<SalesLineItem>,
}

impl Dataset {
    /// 空数据集视为数据源错误
    pub fn new(items: Vec<SalesLineItem>) -> AnalyticsResult<Self> {
        if items.is_empty() {
            return Err(AnalyticsError::EmptyInput);
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[SalesLineItem] {
        &self.items
    }

    /// 数据集中出现过的销售员 (首次出现顺序)
    pub fn sellers(&self) -> Vec<String> {
        let mut seen = indexmap::IndexSet::new();
        for item in &self.items {
            seen.insert(item.seller.as_str());
        }
        seen.into_iter().map(str::to_string).collect()
    }
}

impl Deref for Dataset {
    type Target = [SalesLineItem];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    pub fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    /// 构造一行测试明细；发票总额默认等于明细总额
    pub fn item(invoice_id: i64, seller: &str, revenue: &str) -> SalesLineItem {
        SalesLineItem {
            invoice_id,
            emitted_at: NaiveDate::from_ymd_opt(2024, 5, 10)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            seller: seller.to_string(),
            client: "Client A".to_string(),
            product: "Product A".to_string(),
            product_line: "Line A".to_string(),
            quantity: 1,
            unit_value: dec(revenue),
            total_item_value: dec(revenue),
            purchase_cost: dec("0"),
            profit_value: dec(revenue),
            invoice_total: dec(revenue),
            month: 5,
            year: 2024,
            status: "Invoiced".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_measure_reads_typed_fields() {
        let mut it = item(1, "Ana", "120.50");
        it.quantity = 3;
        it.purchase_cost = dec("80");
        assert_eq!(it.measure(Measure::Revenue), dec("120.50"));
        assert_eq!(it.measure(Measure::Cost), dec("80"));
        assert_eq!(it.measure(Measure::Quantity), dec("3"));
    }

    #[test]
    fn test_day_key_comes_from_emission() {
        let it = item(1, "Ana", "10");
        assert_eq!(it.key(Dimension::Day), GroupKey::Number(10));
        assert_eq!(it.key(Dimension::Seller), GroupKey::from("Ana"));
    }

    #[test]
    fn test_validate_rejects_negative_money_and_bad_month() {
        let mut it = item(1, "Ana", "10");
        it.purchase_cost = dec("-1");
        assert!(matches!(
            it.validate(4),
            Err(AnalyticsError::InvalidRecord { row: 4, .. })
        ));

        let mut it = item(1, "Ana", "10");
        it.month = 13;
        assert!(it.validate(1).is_err());
        assert!(item(1, "Ana", "10").validate(1).is_ok());
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        assert!(matches!(Dataset::new(vec![]), Err(AnalyticsError::EmptyInput)));
    }

    #[test]
    fn test_sellers_keep_first_seen_order() {
        let ds = Dataset::new(vec![
            item(1, "Bia", "1"),
            item(2, "Ana", "1"),
            item(3, "Bia", "1"),
        ])
        .unwrap();
        assert_eq!(ds.sellers(), vec!["Bia".to_string(), "Ana".to_string()]);
    }
}
