use crate::models::Measure;
use thiserror::Error;

/// 分析管道统一结果类型
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// 分析管道错误
///
/// 结构性错误 (缺列、数据源不可读) 直接返回给调用方；
/// 除零类数值边界 (空分组、目标为 0、无发票) 不属于错误，按约定归零。
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// 数据源没有任何记录
    #[error("dataset is empty")]
    EmptyInput,

    /// 必填字段缺失 (列缺失时 `row` 为空；单元格为空时带行号)
    #[error("{}missing required fields: {}", row_prefix(row), fields.join(", "))]
    MissingField {
        row: Option<usize>,
        fields: Vec<String>,
    },

    /// 金额/数量字段不是合法数值
    #[error("row {row}: field `{field}` has invalid numeric value `{value}`")]
    InvalidNumericValue {
        row: usize,
        field: String,
        value: String,
    },

    /// 开票时间无法解析
    #[error("row {row}: invalid emission timestamp `{value}`")]
    InvalidTimestamp { row: usize, value: String },

    /// 记录违反数据约束 (负金额、月份越界等)
    #[error("row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    /// 排名/目标计算引用了分组时未聚合的字段
    #[error("measure `{0}` was not aggregated")]
    MeasureNotAggregated(Measure),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

impl AnalyticsError {
    pub fn missing_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingField {
            row: None,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// 某一数据行的必填单元格为空
    pub fn blank_cells<I, S>(row: usize, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingField {
            row: Some(row),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// 是否属于调用方输入问题 (用于 HTTP 状态码映射)
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::InvalidNumericValue { .. }
                | Self::InvalidTimestamp { .. }
                | Self::InvalidRecord { .. }
                | Self::MeasureNotAggregated(_)
        )
    }
}

fn row_prefix(row: &Option<usize>) -> String {
    row.map(|r| format!("row {}: ", r)).unwrap_or_default()
}
