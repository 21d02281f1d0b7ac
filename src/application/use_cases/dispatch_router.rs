// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing::debug;

use crate::application::use_cases::policy_gate::Admission;
use crate::domain::models::crawl::{CrawlMode, JobDescriptor};
use crate::engines::traits::{ProviderCrawlerOptions, ProviderOptions};

/// 每个 limit 单位对应的默认超时（毫秒）
pub const TIMEOUT_PER_LIMIT_MS: i64 = 20_000;

/// 分发路径
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// 同步抓取并在响应中返回文档
    Sync {
        options: ProviderOptions,
        deadline_ms: i64,
    },
    /// 提交异步任务并返回任务ID
    Async(JobDescriptor),
}

/// 分发路由器
///
/// 单URL的 `single_urls` 请求走同步路径，其余请求走异步任务队列
pub struct DispatchRouter {
    /// 客户端未指定超时时使用的截止时间
    default_timeout_ms: i64,
}

impl DispatchRouter {
    /// 创建新的分发路由器
    ///
    /// # 参数
    ///
    /// * `limit` - 超时倍数，默认超时为 `limit × 20000` 毫秒
    pub fn new(limit: u32) -> Self {
        Self {
            default_timeout_ms: i64::from(limit) * TIMEOUT_PER_LIMIT_MS,
        }
    }

    pub fn default_timeout_ms(&self) -> i64 {
        self.default_timeout_ms
    }

    /// 为准入的请求选择执行路径
    pub fn route(&self, admission: &Admission) -> Dispatch {
        let request = &admission.request;
        let timeout = request.timeout_ms.unwrap_or(self.default_timeout_ms);

        if request.mode == CrawlMode::SingleUrls && request.is_single_url() {
            debug!("Routing {} to synchronous fetch", request.url);
            return Dispatch::Sync {
                options: ProviderOptions {
                    mode: CrawlMode::SingleUrls,
                    urls: vec![request.url.clone()],
                    crawler_options: ProviderCrawlerOptions { urls_only: true },
                    page_options: request.page_options.clone(),
                },
                deadline_ms: timeout,
            };
        }

        debug!("Routing {} ({}) to job queue", request.url, request.mode);
        Dispatch::Async(JobDescriptor {
            url: request.url.clone(),
            mode: request.mode,
            crawler_options: request.crawler_options.clone(),
            page_options: request.page_options.clone(),
            team_id: admission.team_id,
            origin: request.origin.clone(),
            timeout,
        })
    }
}
