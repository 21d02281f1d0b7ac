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

use axum::{
    body::Bytes,
    extract::Extension,
    http::{header, HeaderMap},
    response::Response,
};
use std::sync::Arc;

use crate::{
    application::use_cases::crawl_use_case::CrawlUseCase,
    domain::models::auth::Credentials, presentation::response_builder,
};

/// 创建爬取请求
///
/// 请求体按原样交给准入检查，认证和额度检查通过后才解析。
/// 准入通过后，单URL的 `single_urls` 请求同步返回文档，其余请求返回任务ID
pub async fn create_crawl(
    Extension(use_case): Extension<Arc<CrawlUseCase>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let credentials = Credentials::from_authorization(
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok()),
    );

    response_builder::build(use_case.crawl(&credentials, &body).await)
}
