use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::models::SalesLineItem;
use crate::source::Clock;

/// "全部" 哨兵值，关闭对应谓词
pub const ALL: &str = "All";

/// 默认状态过滤值
pub const INVOICED: &str = "Invoiced";

/// 过滤选择：全部 或 精确匹配
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    All,
    Only(String),
}

impl Selection {
    /// 解析请求参数，`"All"` 表示不过滤
    pub fn from_param(value: &str) -> Self {
        if value == ALL {
            Selection::All
        } else {
            Selection::Only(value.to_string())
        }
    }

    /// 精确匹配 (区分大小写)
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

/// 统计周期 (月/年)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub month: u32,
    pub year: i32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Self {
        Self { month, year }
    }

    /// 由注入的时钟得到当前周期
    pub fn current(clock: &dyn Clock) -> Self {
        use chrono::Datelike;
        let today = clock.today();
        Self {
            month: today.month(),
            year: today.year(),
        }
    }
}

/// 过滤条件 (所有谓词为 AND 关系)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub seller: Selection,
    pub period: Period,
    pub status: Selection,
}

impl FilterCriteria {
    /// 默认条件：全部销售员、指定周期、仅已开票
    pub fn for_period(period: Period) -> Self {
        Self {
            seller: Selection::All,
            period,
            status: Selection::Only(INVOICED.to_string()),
        }
    }

    /// 当前周期的默认条件
    pub fn current(clock: &dyn Clock) -> Self {
        Self::for_period(Period::current(clock))
    }

    pub fn with_seller(mut self, seller: Selection) -> Self {
        self.seller = seller;
        self
    }

    pub fn with_status(mut self, status: Selection) -> Self {
        self.status = status;
        self
    }

    pub fn matches(&self, item: &SalesLineItem) -> bool {
        self.seller.matches(&item.seller)
            && item.month == self.period.month
            && item.year == self.period.year
            && self.status.matches(&item.status)
    }
}

/// 过滤结果：对原始数据的只读视图，附带产生它的条件
#[derive(Debug, Clone, PartialEq)]
pub struct ScopedDataset<'a> {
    criteria: FilterCriteria,
    rows: Vec<&'a SalesLineItem>,
}

impl<'a> ScopedDataset<'a> {
    pub(crate) fn new(criteria: FilterCriteria, rows: Vec<&'a SalesLineItem>) -> Self {
        Self { criteria, rows }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn rows(&self) -> &[&'a SalesLineItem] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a SalesLineItem> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 按发票去重：每张发票保留首行，用于发票级指标 (如客单价)
    pub fn unique_invoices(&self) -> ScopedDataset<'a> {
        let mut seen = IndexSet::new();
        let rows = self
            .rows
            .iter()
            .copied()
            .filter(|item| seen.insert(item.invoice_id))
            .collect();
        ScopedDataset::new(self.criteria.clone(), rows)
    }
}
