// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::domain::models::crawl::{default_page_options, CrawlMode, CrawlRequest};

/// 爬取请求数据传输对象
///
/// 客户端提交的原始请求体，字段校验推迟到认证和额度检查之后
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CrawlRequestDto {
    /// 目标URL
    #[validate(
        required(message = "Url is required"),
        length(min = 1, message = "Url is required")
    )]
    pub url: Option<String>,
    /// 爬取模式
    pub mode: Option<String>,
    /// 爬虫选项
    pub crawler_options: Option<Value>,
    /// 页面选项
    pub page_options: Option<Value>,
    /// 超时时间（毫秒）
    pub timeout: Option<i64>,
    /// 请求来源
    pub origin: Option<String>,
}

impl CrawlRequestDto {
    /// 从原始请求体解析
    ///
    /// 空请求体视为 `{}`，与未声明内容类型的请求一致
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlRequestDto)` - 解析后的请求体
    /// * `Err(String)` - 面向客户端的错误信息
    pub fn from_body(body: &[u8]) -> Result<Self, String> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| format!("Invalid request body: {}", e))
    }

    /// 校验并转换为领域请求
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlRequest)` - 校验通过的请求
    /// * `Err(String)` - 面向客户端的错误信息
    pub fn to_request(&self) -> Result<CrawlRequest, String> {
        self.validate().map_err(|e| first_message(&e))?;

        let url = self.url.clone().unwrap_or_default();
        if url.trim().is_empty() {
            return Err("Url is required".to_string());
        }

        Ok(CrawlRequest {
            url,
            mode: CrawlMode::parse(self.mode.as_deref())?,
            crawler_options: non_null(self.crawler_options.clone())
                .unwrap_or_else(|| Value::Object(Default::default())),
            page_options: non_null(self.page_options.clone()).unwrap_or_else(default_page_options),
            timeout_ms: self.timeout,
            origin: self.origin.clone().unwrap_or_else(|| "api".to_string()),
        })
    }
}

fn non_null(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null())
}

fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}
