use bigdecimal::{BigDecimal, Zero};
use std::collections::HashSet;
use std::sync::Arc;

use crate::config::{AppConfig, DashboardConfig};
use crate::error::AnalyticsResult;
use crate::format::CurrencyFormatter;
use crate::models::{
    Aggregation, Aggregations, DashboardView, Dataset, Dimension, FilterCriteria, LineShare,
    Measure, MetricCards, Period, ScopedDataset, SellerGoals, Selection, SeriesPoint,
};
use crate::service::{filter, goals, grouping, metrics, ranking, series};
use crate::source::Clock;

/// 仪表盘查询参数 (未提供的月/年取注入时钟的当前周期)
#[derive(Debug, Clone, Default)]
pub struct DashboardQuery {
    pub seller: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub status: Option<String>,
}

/// 仪表盘服务：对共享只读数据快照组合整条分析管道
pub struct DashboardService {
    dataset: Arc<Dataset>,
    clock: Arc<dyn Clock>,
    formatter: Arc<dyn CurrencyFormatter>,
    settings: DashboardConfig,
    goals: SellerGoals,
    excluded_sellers: HashSet<String>,
}

impl DashboardService {
    pub fn new(
        dataset: Arc<Dataset>,
        config: &AppConfig,
        clock: Arc<dyn Clock>,
        formatter: Arc<dyn CurrencyFormatter>,
    ) -> Self {
        Self {
            dataset,
            clock,
            formatter,
            settings: config.dashboard.clone(),
            goals: config.goals.seller_goals(),
            excluded_sellers: config.goals.excluded_sellers.clone(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// 把请求参数解析为过滤条件
    pub fn criteria(&self, query: &DashboardQuery) -> FilterCriteria {
        let current = Period::current(self.clock.as_ref());
        let period = Period::new(
            query.month.unwrap_or(current.month),
            query.year.unwrap_or(current.year),
        );
        let seller = query
            .seller
            .as_deref()
            .map_or(Selection::All, Selection::from_param);
        let status = Selection::from_param(
            query
                .status
                .as_deref()
                .unwrap_or(&self.settings.default_status),
        );
        FilterCriteria::for_period(period)
            .with_seller(seller)
            .with_status(status)
    }

    /// 计算一次完整的仪表盘数据
    pub fn build(&self, criteria: &FilterCriteria) -> AnalyticsResult<DashboardView> {
        let start = std::time::Instant::now();
        let scope = filter::filter(&self.dataset, criteria);
        tracing::info!(
            "Building dashboard for {:?}: {} line items in scope",
            criteria,
            scope.len()
        );

        // 各图表互不依赖，只读共享 scope，可并行计算
        let ((cards, daily_sales), ((sales_by_seller, top_products), (sales_by_line, rest))) =
            rayon::join(
                || rayon::join(|| self.cards(&scope), || self.daily_sales(&scope)),
                || {
                    rayon::join(
                        || {
                            rayon::join(
                                || self.sales_by_seller(&scope),
                                || self.top_products(&scope),
                            )
                        },
                        || {
                            rayon::join(
                                || self.sales_by_line(&scope),
                                || self.seller_charts(&scope),
                            )
                        },
                    )
                },
            );
        let (average_ticket_by_seller, top_clients, top_clients_series, goal_performance) = rest?;

        let view = DashboardView {
            criteria: criteria.clone(),
            cards,
            daily_sales,
            sales_by_seller: sales_by_seller?,
            top_products: top_products?,
            sales_by_line,
            average_ticket_by_seller,
            top_clients,
            top_clients_series,
            goal_performance,
        };

        tracing::info!("Dashboard built in {:?}", start.elapsed());
        Ok(view)
    }

    fn cards(&self, scope: &ScopedDataset<'_>) -> MetricCards {
        let metrics = metrics::compute(scope);
        let fmt = self.formatter.as_ref();
        MetricCards {
            revenue_display: fmt.format(Some(&metrics.total_revenue)),
            average_ticket_display: fmt.format(Some(&metrics.average_ticket)),
            cost_display: fmt.format(Some(&metrics.total_cost)),
            profit_display: fmt.format(Some(&metrics.total_profit)),
            metrics,
        }
    }

    /// 日销售额，按日期升序
    fn daily_sales(&self, scope: &ScopedDataset<'_>) -> Vec<SeriesPoint> {
        let by_day = grouping::group_and_sum(scope, Dimension::Day).sorted_by_key();
        series::aggregate_series(&by_day, Measure::Revenue, self.formatter.as_ref())
    }

    /// 各销售员销售额，降序
    fn sales_by_seller(&self, scope: &ScopedDataset<'_>) -> AnalyticsResult<Vec<SeriesPoint>> {
        let by_seller = grouping::group_and_sum(scope, Dimension::Seller);
        let ranked = ranking::top(&by_seller, Measure::Revenue, by_seller.len())?;
        Ok(series::to_series(&ranked, self.formatter.as_ref()))
    }

    fn top_products(&self, scope: &ScopedDataset<'_>) -> AnalyticsResult<Vec<SeriesPoint>> {
        let by_product = grouping::group_and_sum(scope, Dimension::Product);
        let ranked = ranking::top(&by_product, Measure::Revenue, self.settings.top_products)?;
        Ok(series::ranked_series(
            &ranked,
            self.settings.product_label_len,
            false,
            self.formatter.as_ref(),
        ))
    }

    /// 产品线销售额及占比 (%)
    fn sales_by_line(&self, scope: &ScopedDataset<'_>) -> Vec<LineShare> {
        let by_line = grouping::group_and_sum(scope, Dimension::ProductLine);
        let total = by_line.total(Measure::Revenue);
        series::aggregate_series(&by_line, Measure::Revenue, self.formatter.as_ref())
            .into_iter()
            .map(|point| {
                let share_pct = if total > BigDecimal::zero() {
                    (&point.value * BigDecimal::from(100) / &total).round(2)
                } else {
                    BigDecimal::zero()
                };
                LineShare { point, share_pct }
            })
            .collect()
    }

    /// 客单价、客户排名、目标达成
    #[allow(clippy::type_complexity)]
    fn seller_charts(
        &self,
        scope: &ScopedDataset<'_>,
    ) -> AnalyticsResult<(
        Vec<SeriesPoint>,
        Vec<crate::models::RankedEntry>,
        Vec<SeriesPoint>,
        Vec<crate::models::GoalPerformance>,
    )> {
        let fmt = self.formatter.as_ref();

        // 客单价按发票去重后取发票总额均值
        let ticket_spec = Aggregations::empty().with(Measure::InvoiceTotal, Aggregation::Mean);
        let tickets = grouping::group_by(&scope.unique_invoices(), Dimension::Seller, &ticket_spec);
        let average_ticket_by_seller = series::aggregate_series(&tickets, Measure::InvoiceTotal, fmt);

        let by_client = grouping::group_and_sum(scope, Dimension::Client);
        let top_clients = ranking::top(&by_client, Measure::Revenue, self.settings.top_clients)?;
        let top_clients_series = series::ranked_series(
            &top_clients,
            self.settings.client_label_len,
            self.settings.client_label_ellipsis,
            fmt,
        );

        let by_seller = grouping::group_and_sum(scope, Dimension::Seller);
        let goal_performance = goals::evaluate(&by_seller, &self.goals, &self.excluded_sellers)?;

        Ok((
            average_ticket_by_seller,
            top_clients,
            top_clients_series,
            goal_performance,
        ))
    }
}
