// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::helpers::{create_test_app, ProviderScript};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::util::ServiceExt;

/// 健康检查测试
///
/// 验证健康检查端点是否正常工作
#[tokio::test]
async fn health_check_works() {
    let app = create_test_app(ProviderScript::Hang);

    let response = app
        .router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn version_reports_package_version() {
    let app = create_test_app(ProviderScript::Hang);

    let response = app.server.get("/v0/version").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));
}

/// 未安装指标记录器时返回503
#[tokio::test]
async fn metrics_unavailable_without_recorder() {
    let app = create_test_app(ProviderScript::Hang);

    let response = app.server.get("/metrics").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}
