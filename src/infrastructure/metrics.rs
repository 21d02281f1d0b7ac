// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{info, warn};

/// 爬取请求计数器名称
pub const CRAWL_REQUESTS_TOTAL: &str = "crawl_requests_total";

/// 安装 Prometheus 记录器
///
/// 返回的句柄用于 `/metrics` 端点渲染；安装失败（例如已安装过）时返回 `None`
pub fn init_metrics() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            info!("Prometheus recorder installed");
            Some(handle)
        }
        Err(e) => {
            warn!("Failed to install Prometheus recorder: {}", e);
            None
        }
    }
}

/// 记录一次爬取请求的最终结果
pub fn record_crawl_outcome(outcome: &'static str) {
    metrics::counter!(CRAWL_REQUESTS_TOTAL, "outcome" => outcome).increment(1);
}
