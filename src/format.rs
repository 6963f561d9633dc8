use bigdecimal::{BigDecimal, Zero};
use std::str::FromStr;

/// 非法数值的展示标记 (区别于缺失值的空字符串)
pub const INVALID_VALUE: &str = "invalid value";

/// 货币格式化策略
///
/// 计算层只产出数值，展示字符串统一交给实现者。
pub trait CurrencyFormatter: Send + Sync {
    /// 缺失值返回空字符串
    fn format(&self, value: Option<&BigDecimal>) -> String;

    /// 格式化原始单元格：空白/`NaN` 视为缺失，无法解析返回 `INVALID_VALUE`
    fn format_raw(&self, raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
            return String::new();
        }
        match BigDecimal::from_str(raw) {
            Ok(value) => self.format(Some(&value)),
            Err(_) => INVALID_VALUE.to_string(),
        }
    }
}

/// 巴西雷亚尔格式：`R$ 1.234,56`
#[derive(Debug, Clone)]
pub struct BrlFormatter {
    symbol: String,
}

impl BrlFormatter {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

impl Default for BrlFormatter {
    fn default() -> Self {
        Self::new("R$")
    }
}

impl CurrencyFormatter for BrlFormatter {
    fn format(&self, value: Option<&BigDecimal>) -> String {
        let Some(value) = value else {
            return String::new();
        };

        let negative = *value < BigDecimal::zero();
        let fixed = value.abs().round(2).with_scale(2).to_string();
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        let sign = if negative { "-" } else { "" };
        format!("{} {}{},{}", self.symbol, sign, grouped, frac_part)
    }
}
