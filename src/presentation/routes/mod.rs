// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::application::use_cases::crawl_use_case::CrawlUseCase;
use crate::presentation::handlers::{crawl_handler, metrics_handler};
use crate::presentation::response_builder;

/// 创建应用路由
///
/// # 参数
///
/// * `use_case` - 爬取用例
/// * `metrics` - Prometheus 句柄（未安装记录器时为 `None`）
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(use_case: Arc<CrawlUseCase>, metrics: Option<PrometheusHandle>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v0/version", get(version))
        .route("/metrics", get(metrics_handler::metrics));

    let crawl_routes = Router::new().route("/v0/crawl", post(crawl_handler::create_crawl));

    Router::new()
        .merge(public_routes)
        .merge(crawl_routes)
        .layer(Extension(use_case))
        .layer(Extension(metrics))
        .layer(CatchPanicLayer::custom(response_builder::panic_response))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
