use sales_analytics_rust::{
    api, load_dataset, AppConfig, BrlFormatter, DashboardService, SystemClock,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::load()?;
    info!("Starting server with config: {:?}", config);

    // 加载数据快照 (文件缺失、为空或缺列时直接退出)
    let dataset = match load_dataset(&config.dataset.path) {
        Ok(dataset) => Arc::new(dataset),
        Err(e) => {
            tracing::error!("Failed to load dataset {}: {}", config.dataset.path.display(), e);
            return Err(e.into());
        }
    };
    info!("Dataset ready: {} line items", dataset.len());

    // 时钟与格式化器在入口注入
    let service = Arc::new(DashboardService::new(
        dataset,
        &config,
        Arc::new(SystemClock),
        Arc::new(BrlFormatter::new(config.dashboard.currency_symbol.clone())),
    ));

    let app = api::router(service).layer(ServiceBuilder::new());

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET /api/dashboard?seller=&month=&year=&status=");
    info!("  GET /api/sellers");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
