// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;

/// Prometheus 指标端点
pub async fn metrics(Extension(handle): Extension<Option<PrometheusHandle>>) -> impl IntoResponse {
    match handle {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder is not installed".to_string(),
        ),
    }
}
