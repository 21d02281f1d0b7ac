// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use uuid::Uuid;

/// 多URL分隔符
pub const MULTI_URL_DELIMITER: char = ',';

/// 爬取模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CrawlMode {
    /// 单页抓取，同步返回结果
    #[serde(rename = "single_urls")]
    SingleUrls,
    /// 整站爬取（默认）
    #[default]
    #[serde(rename = "crawl")]
    Crawl,
    /// 站点地图爬取
    #[serde(rename = "sitemap")]
    Sitemap,
}

impl CrawlMode {
    /// 解析客户端提供的模式字符串
    ///
    /// 缺失、null 或空字符串一律视为 `Crawl`。
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlMode)` - 解析后的模式
    /// * `Err(String)` - 未知模式的错误信息
    pub fn parse(raw: Option<&str>) -> Result<Self, String> {
        match raw.map(str::trim) {
            None | Some("") => Ok(CrawlMode::Crawl),
            Some("single_urls") | Some("single") => Ok(CrawlMode::SingleUrls),
            Some("crawl") => Ok(CrawlMode::Crawl),
            Some("sitemap") => Ok(CrawlMode::Sitemap),
            Some(other) => Err(format!("Invalid mode: {}", other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CrawlMode::SingleUrls => "single_urls",
            CrawlMode::Crawl => "crawl",
            CrawlMode::Sitemap => "sitemap",
        }
    }
}

impl fmt::Display for CrawlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 默认页面选项
pub fn default_page_options() -> Value {
    json!({ "onlyMainContent": false })
}

/// 经过校验的爬取请求
///
/// 只能由请求 DTO 的校验步骤构造，构造后不再修改。
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlRequest {
    /// 目标URL（可能包含以逗号分隔的多个URL）
    pub url: String,
    /// 爬取模式
    pub mode: CrawlMode,
    /// 爬虫选项，原样透传
    pub crawler_options: Value,
    /// 页面选项，原样透传
    pub page_options: Value,
    /// 客户端指定的超时时间（毫秒）
    pub timeout_ms: Option<i64>,
    /// 请求来源标记
    pub origin: String,
}

impl CrawlRequest {
    /// 目标是否为单个URL
    pub fn is_single_url(&self) -> bool {
        !self.url.contains(MULTI_URL_DELIMITER)
    }
}

/// 抓取得到的文档
///
/// 文档内容对本服务不透明，直接序列化给调用方。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(pub Value);

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// 异步爬取任务描述
///
/// 提交给任务队列后不再修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescriptor {
    pub url: String,
    pub mode: CrawlMode,
    pub crawler_options: Value,
    pub page_options: Value,
    pub team_id: Uuid,
    pub origin: String,
    pub timeout: i64,
}

/// 任务句柄
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHandle {
    /// 任务ID
    pub id: String,
}
