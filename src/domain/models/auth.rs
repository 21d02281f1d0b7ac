// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 限流类别
///
/// 不同操作使用不同的限流配额
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimiterMode {
    /// 爬取（重量级操作）
    Crawl,
    /// 爬取状态查询
    CrawlStatus,
    /// 单页抓取
    Scrape,
    /// 搜索
    Search,
    /// 预览
    Preview,
}

impl fmt::Display for RateLimiterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RateLimiterMode::Crawl => "crawl",
            RateLimiterMode::CrawlStatus => "crawl_status",
            RateLimiterMode::Scrape => "scrape",
            RateLimiterMode::Search => "search",
            RateLimiterMode::Preview => "preview",
        };
        f.write_str(name)
    }
}

/// 请求凭据
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Bearer 令牌中的API密钥
    pub api_key: Option<String>,
}

impl Credentials {
    /// 从 `Authorization` 头的值中解析凭据
    pub fn from_authorization(header: Option<&str>) -> Self {
        let api_key = header
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);
        Self { api_key }
    }
}

/// 认证结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// 团队ID（认证成功时存在）
    pub team_id: Option<Uuid>,
    /// 是否通过认证与授权
    pub is_authorized: bool,
    /// 拒绝时的状态码
    pub rejection_status: Option<u16>,
    /// 拒绝原因
    pub rejection_reason: Option<String>,
}

impl AuthContext {
    pub fn authorized(team_id: Uuid) -> Self {
        Self {
            team_id: Some(team_id),
            is_authorized: true,
            rejection_status: None,
            rejection_reason: None,
        }
    }

    pub fn rejected(status: u16, reason: impl Into<String>) -> Self {
        Self {
            team_id: None,
            is_authorized: false,
            rejection_status: Some(status),
            rejection_reason: Some(reason.into()),
        }
    }
}

/// 额度检查结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditCheckResult {
    /// 额度是否充足
    pub sufficient: bool,
    /// 附加信息
    pub message: Option<String>,
}

impl CreditCheckResult {
    pub fn sufficient() -> Self {
        Self {
            sufficient: true,
            message: None,
        }
    }

    pub fn insufficient(message: impl Into<String>) -> Self {
        Self {
            sufficient: false,
            message: Some(message.into()),
        }
    }
}
