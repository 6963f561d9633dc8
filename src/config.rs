use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::AnalyticsResult;
use crate::models::{MissingGoalPolicy, SellerGoals, INVOICED};

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
    pub dashboard: DashboardConfig,
    pub goals: GoalsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/sales.csv"),
        }
    }
}

/// 仪表盘展示参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub top_clients: usize,
    pub top_products: usize,
    pub client_label_len: usize,
    /// 客户名被截断时追加 "..."
    pub client_label_ellipsis: bool,
    pub product_label_len: usize,
    /// 请求未指定状态时使用
    pub default_status: String,
    pub currency_symbol: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_clients: 5,
            top_products: 5,
            client_label_len: 25,
            client_label_ellipsis: true,
            product_label_len: 15,
            default_status: INVOICED.to_string(),
            currency_symbol: "R$".to_string(),
        }
    }
}

/// 单个销售员目标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerTarget {
    pub seller: String,
    pub target: BigDecimal,
}

/// 销售目标配置
///
/// 目标以 `[[goals.targets]]` 列表配置，销售员名区分大小写。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalsConfig {
    pub targets: Vec<SellerTarget>,
    /// 不参与业绩评估的销售员 (如公司账户)
    pub excluded_sellers: HashSet<String>,
    pub missing_goal: MissingGoalPolicy,
}

impl GoalsConfig {
    pub fn seller_goals(&self) -> SellerGoals {
        SellerGoals::new(
            self.targets
                .iter()
                .map(|t| (t.seller.clone(), t.target.clone())),
        )
        .with_missing_goal(self.missing_goal)
    }
}

/// 环境变量前缀，层级分隔符为 `__`
pub const ENV_PREFIX: &str = "DASHBOARD";

/// 以逗号分隔的列表型配置项
const LIST_KEYS: [&str; 1] = ["goals.excluded_sellers"];

impl AppConfig {
    /// 加载配置：默认值 < `config/dashboard.toml` (可选) < 环境变量 `DASHBOARD__*`
    pub fn load() -> AnalyticsResult<Self> {
        Self::load_from("config/dashboard")
    }

    pub fn load_from(file: &str) -> AnalyticsResult<Self> {
        Self::load_with_env(file, ENV_PREFIX)
    }

    /// 列表项如 `DASHBOARD__GOALS__EXCLUDED_SELLERS=House,Matriz`
    pub fn load_with_env(file: &str, env_prefix: &str) -> AnalyticsResult<Self> {
        let mut environment = config::Environment::with_prefix(env_prefix)
            .separator("__")
            .try_parsing(true)
            .list_separator(",");
        for key in LIST_KEYS {
            environment = environment.with_list_parse_key(key);
        }

        let settings = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(environment)
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
