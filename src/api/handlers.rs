use crate::error::AnalyticsError;
use crate::models::DashboardView;
use crate::service::{DashboardQuery, DashboardService};
use axum::{
    extract::{rejection::QueryRejection, Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 查询参数: 销售员 / 月 / 年 / 状态 ("All" 表示不过滤)
#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    pub seller: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub status: Option<String>,
}

impl From<DashboardParams> for DashboardQuery {
    fn from(params: DashboardParams) -> Self {
        Self {
            seller: params.seller,
            month: params.month,
            year: params.year,
            status: params.status,
        }
    }
}

/// 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

/// 销售员列表响应体
#[derive(Debug, Serialize)]
pub struct SellersResponse {
    pub success: bool,
    pub sellers: Vec<String>,
}

fn error_response(status: StatusCode, message: String) -> Response {
    let response = ErrorResponse {
        success: false,
        message,
    };
    (status, Json(response)).into_response()
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 仪表盘数据接口
pub async fn dashboard(
    State(service): State<Arc<DashboardService>>,
    params: Result<Query<DashboardParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => {
            tracing::warn!("Invalid dashboard query: {}", rejection.body_text());
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Error: {}", rejection.body_text()),
            );
        }
    };

    if let Some(month) = params.month {
        if !(1..=12).contains(&month) {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Error: month must be within 1..=12, got {}", month),
            );
        }
    }

    let criteria = service.criteria(&params.into());
    // 纯 CPU 计算，放到阻塞线程池
    let result = tokio::task::spawn_blocking(move || service.build(&criteria)).await;

    match result {
        Ok(Ok(view)) => (StatusCode::OK, Json::<DashboardView>(view)).into_response(),
        Ok(Err(e)) => {
            tracing::error!("Dashboard build failed: {}", e);
            e.into_response()
        }
        Err(e) => {
            tracing::error!("Dashboard task panicked: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", e))
        }
    }
}

/// 可选销售员 (过滤下拉框)
pub async fn sellers(State(service): State<Arc<DashboardService>>) -> Response {
    let response = SellersResponse {
        success: true,
        sellers: service.dataset().sellers(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

impl IntoResponse for AnalyticsError {
    fn into_response(self) -> Response {
        let status = if self.is_input_error() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        error_response(status, format!("Error: {}", self))
    }
}
