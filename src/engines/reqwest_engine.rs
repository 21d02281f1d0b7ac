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

use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::json;
use std::time::Instant;
use tracing::debug;

use crate::domain::models::crawl::Document;
use crate::engines::traits::{DocumentProvider, EngineError, ProviderOptions};
use crate::engines::validators;

/// 基于 reqwest 的文档提供者
///
/// 逐个抓取配置中的URL，每个URL生成一个文档
pub struct ReqwestDocumentProvider {
    client: reqwest::Client,
    allow_private_addresses: bool,
}

impl ReqwestDocumentProvider {
    /// 创建新的文档提供者
    ///
    /// # 参数
    ///
    /// * `user_agent` - 请求使用的 User-Agent
    /// * `allow_private_addresses` - 是否允许抓取内网地址（关闭 SSRF 防护）
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestDocumentProvider)` - 提供者实例
    /// * `Err(EngineError)` - 客户端构建失败
    pub fn new(user_agent: &str, allow_private_addresses: bool) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(redirect_policy(allow_private_addresses))
            .build()?;
        Ok(Self {
            client,
            allow_private_addresses,
        })
    }

    async fn fetch_one(&self, url: &str) -> Result<Document, EngineError> {
        if !self.allow_private_addresses {
            validators::validate_url(url).await?;
        }

        let start = Instant::now();
        let response = self.client.get(url).send().await?;

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.trim().is_empty())
            .unwrap_or("text/html")
            .to_string();
        let content = response.text().await?;

        debug!(
            "Fetched {} ({} bytes, status {}) in {:?}",
            url,
            content.len(),
            status_code,
            start.elapsed()
        );

        Ok(Document(json!({
            "content": content,
            "metadata": {
                "sourceURL": url,
                "statusCode": status_code,
                "contentType": content_type,
            }
        })))
    }
}

/// 重定向策略
///
/// 启用 SSRF 防护时不跟随重定向，只有经过校验的URL才会被请求
fn redirect_policy(allow_private_addresses: bool) -> reqwest::redirect::Policy {
    if allow_private_addresses {
        reqwest::redirect::Policy::limited(10)
    } else {
        reqwest::redirect::Policy::none()
    }
}

#[async_trait]
impl DocumentProvider for ReqwestDocumentProvider {
    async fn fetch_documents(
        &self,
        options: &ProviderOptions,
    ) -> Result<Vec<Document>, EngineError> {
        if options.urls.is_empty() {
            return Err(EngineError::Other("No URLs to fetch".to_string()));
        }
        try_join_all(options.urls.iter().map(|url| self.fetch_one(url))).await
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}
