use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::{Dataset, SalesLineItem};

/// 数据文件必须包含的列
pub const REQUIRED_COLUMNS: [&str; 15] = [
    "invoice_id",
    "emitted_at",
    "seller",
    "client",
    "product",
    "product_line",
    "quantity",
    "unit_value",
    "total_item_value",
    "purchase_cost",
    "profit_value",
    "invoice_total",
    "month",
    "year",
    "status",
];

/// 开票时间支持的格式 (日在前优先)
const DATETIME_FORMATS: [&str; 5] = [
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];
const DATE_FORMATS: [&str; 2] = ["%d/%m/%Y", "%Y-%m-%d"];

/// 从 CSV 文件加载数据集
pub fn load_dataset(path: &Path) -> AnalyticsResult<Dataset> {
    tracing::info!("Loading dataset from {}", path.display());
    let file = std::fs::File::open(path)?;
    let dataset = read_dataset(file)?;
    tracing::info!("Loaded {} line items", dataset.len());
    Ok(dataset)
}

/// 从任意 reader 读取 CSV 数据集
///
/// 先校验表头，缺列时一次性列出全部缺失字段；没有数据行返回 `EmptyInput`。
pub fn read_dataset<R: Read>(reader: R) -> AnalyticsResult<Dataset> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = reader.headers()?.clone();
    let index: HashMap<&str, usize> = headers.iter().enumerate().map(|(i, h)| (h, i)).collect();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !index.contains_key(col))
        .collect();
    if !missing.is_empty() {
        tracing::error!("Dataset header is missing columns: {:?}", missing);
        return Err(AnalyticsError::missing_fields(missing));
    }

    let mut items = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        // 行号从 1 开始，不含表头
        let row = RowReader {
            row: idx + 1,
            record: record?,
            index: &index,
        };
        let item = row.parse()?;
        item.validate(row.row)?;
        items.push(item);
    }

    Dataset::new(items)
}

struct RowReader<'a> {
    row: usize,
    record: StringRecord,
    index: &'a HashMap<&'a str, usize>,
}

impl RowReader<'_> {
    fn parse(&self) -> AnalyticsResult<SalesLineItem> {
        self.check_blank_cells()?;

        Ok(SalesLineItem {
            invoice_id: self.number("invoice_id")?,
            emitted_at: self.timestamp("emitted_at")?,
            seller: self.text("seller").to_string(),
            client: self.text("client").to_string(),
            product: self.text("product").to_string(),
            product_line: self.text("product_line").to_string(),
            quantity: self.count("quantity")?,
            unit_value: self.decimal("unit_value")?,
            total_item_value: self.decimal("total_item_value")?,
            purchase_cost: self.decimal("purchase_cost")?,
            profit_value: self.decimal("profit_value")?,
            invoice_total: self.decimal("invoice_total")?,
            month: self.number("month")?,
            year: self.number("year")?,
            status: self.text("status").to_string(),
        })
    }

    fn check_blank_cells(&self) -> AnalyticsResult<()> {
        let blank: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|col| self.text(col).is_empty())
            .collect();
        if blank.is_empty() {
            Ok(())
        } else {
            Err(AnalyticsError::blank_cells(self.row, blank))
        }
    }

    fn text(&self, column: &str) -> &str {
        self.index
            .get(column)
            .and_then(|&i| self.record.get(i))
            .unwrap_or("")
    }

    fn invalid(&self, column: &str) -> AnalyticsError {
        AnalyticsError::InvalidNumericValue {
            row: self.row,
            field: column.to_string(),
            value: self.text(column).to_string(),
        }
    }

    fn number<T: FromStr>(&self, column: &str) -> AnalyticsResult<T> {
        self.text(column).parse().map_err(|_| self.invalid(column))
    }

    /// 非负整数计数；接受 `2.0` 这类整数值的小数写法
    fn count(&self, column: &str) -> AnalyticsResult<u64> {
        let value = self.decimal(column)?;
        if value.with_scale(0) != value {
            return Err(self.invalid(column));
        }
        value.to_u64().ok_or_else(|| self.invalid(column))
    }

    fn decimal(&self, column: &str) -> AnalyticsResult<BigDecimal> {
        BigDecimal::from_str(self.text(column)).map_err(|_| self.invalid(column))
    }

    fn timestamp(&self, column: &str) -> AnalyticsResult<NaiveDateTime> {
        let raw = self.text(column);
        parse_timestamp(raw).ok_or_else(|| AnalyticsError::InvalidTimestamp {
            row: self.row,
            value: raw.to_string(),
        })
    }
}

/// 解析混合格式的开票时间；纯日期按零点处理
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
