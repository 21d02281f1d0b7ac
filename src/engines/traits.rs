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
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::models::crawl::{CrawlMode, Document};

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// SSRF 防护拦截
    #[error("SSRF protection: {0}")]
    Ssrf(String),
    /// 抓取任务异常终止
    #[error("Fetch task aborted: {0}")]
    Aborted(String),
    /// 其他错误
    #[error("{0}")]
    Other(String),
}

/// 提供者的爬虫选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCrawlerOptions {
    /// 只处理给定的URL列表，不做深度爬取
    pub urls_only: bool,
}

/// 文档提供者配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderOptions {
    pub mode: CrawlMode,
    pub urls: Vec<String>,
    pub crawler_options: ProviderCrawlerOptions,
    pub page_options: Value,
}

/// 文档提供者特质
///
/// 按配置抓取页面并返回文档列表
#[async_trait]
pub trait DocumentProvider: Send + Sync {
    /// 抓取文档
    async fn fetch_documents(&self, options: &ProviderOptions)
        -> Result<Vec<Document>, EngineError>;

    /// 提供者名称
    fn name(&self) -> &'static str;
}
