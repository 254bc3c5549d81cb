// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{DefaultBodyLimit, Extension},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::domain::repositories::task_gateway::TaskGateway;
use crate::domain::services::import_validator::ImportRules;
use crate::infrastructure::http::in_flight::InFlightTracker;
use crate::presentation::handlers::{import_handler, task_handler};

/// 请求体上限在文件大小上限之外的余量，超出文件上限的上传仍由导入校验给出明确提示
const BODY_LIMIT_HEADROOM: usize = 1024 * 1024;

/// 创建应用路由
///
/// # 参数
///
/// * `gateway` - 下载服务后端网关
/// * `rules` - 导入规则
/// * `in_flight` - 在途请求计数，用于健康检查
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes<G>(gateway: Arc<G>, rules: ImportRules, in_flight: InFlightTracker) -> Router
where
    G: TaskGateway + 'static,
{
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let api_routes = Router::new()
        .route(
            "/v1/imports/preview",
            post(import_handler::preview_import::<G>),
        )
        .route("/v1/imports", post(import_handler::execute_import::<G>))
        .route("/v1/tasks", post(task_handler::create_task::<G>))
        .route("/v1/tasks/batch", post(task_handler::batch_operate::<G>))
        .layer(DefaultBodyLimit::max(
            (rules.max_file_bytes as usize).saturating_add(BODY_LIMIT_HEADROOM),
        ));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(Extension(gateway))
        .layer(Extension(rules))
        .layer(Extension(in_flight))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回服务状态和当前访问后端的在途请求数
pub async fn health_check(Extension(in_flight): Extension<InFlightTracker>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "in_flight": in_flight.in_flight(),
    }))
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
