pub mod handlers;

pub use handlers::*;

use crate::service::DashboardService;
use axum::{routing::get, Router};
use std::sync::Arc;

/// 构建路由
pub fn router(service: Arc<DashboardService>) -> Router {
    let api_routes = Router::new()
        .route("/api/dashboard", get(handlers::dashboard))
        .route("/api/sellers", get(handlers::sellers))
        .with_state(service);

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(api_routes)
}
