//! Mock 商品管理后端
//!
//! 模拟商品管理后端的 crate，用于开发环境和场景引擎的端到端测试。
//!
//! # 主要模块
//!
//! - `services`: 认证与商品 CRUD 的 REST 实现
//! - `store`: 内存存储实现
//! - `seed`: 示例商品数据

pub mod seed;
pub mod services;
pub mod store;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::services::{AuthServiceState, ProductServiceState, auth_routes, product_routes};

/// 组合完整的后端路由
///
/// 健康检查端点独立于业务服务，便于运维监控。
pub fn build_router(auth: Arc<AuthServiceState>, products: Arc<ProductServiceState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(auth_routes().with_state(auth))
        .merge(product_routes().with_state(products))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查响应
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// 健康检查端点
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
