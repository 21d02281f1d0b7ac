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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use uuid::Uuid;

/// 默认社交媒体黑名单
pub const DEFAULT_BLOCKED_DOMAINS: &[&str] = &[
    "facebook.com",
    "instagram.com",
    "twitter.com",
    "x.com",
    "linkedin.com",
    "pinterest.com",
    "snapchat.com",
    "tiktok.com",
    "wechat.com",
    "whatsapp.com",
    "telegram.org",
];

/// 应用程序配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// Redis配置
    pub redis: RedisSettings,
    /// 爬取配置
    pub crawl: CrawlSettings,
    /// 认证配置
    pub auth: AuthSettings,
    /// 速率限制配置
    pub rate_limiting: RateLimitingSettings,
    /// 额度配置
    pub credits: CreditsSettings,
    /// 黑名单配置
    pub blocklist: BlocklistSettings,
    /// 抓取配置
    pub fetch: FetchSettings,
    /// 队列配置
    pub queue: QueueSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// Redis配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    /// Redis连接URL
    pub url: String,
}

/// 爬取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlSettings {
    /// 默认超时倍数，默认超时 = limit × 20000 毫秒
    pub limit: u32,
    /// 同步抓取超时后是否中止后台抓取任务
    pub abort_on_timeout: bool,
}

/// 单个API密钥
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeySettings {
    pub key: String,
    pub team_id: Uuid,
}

/// 认证配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// 是否启用认证；关闭时所有请求以空团队ID放行
    pub enabled: bool,
    /// 已签发的API密钥
    #[serde(default)]
    pub api_keys: Vec<ApiKeySettings>,
}

/// 速率限制配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitingSettings {
    /// 是否启用速率限制
    pub enabled: bool,
    /// 爬取类请求每分钟限制
    pub crawl_rpm: u32,
    /// 其他请求每分钟限制
    pub default_rpm: u32,
}

/// 额度配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CreditsSettings {
    /// 新团队的初始额度
    pub default_balance: i64,
}

/// 黑名单配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct BlocklistSettings {
    /// 禁止抓取的域名（含子域名）
    pub domains: Vec<String>,
}

/// 抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    /// User-Agent
    pub user_agent: String,
    /// 是否允许抓取内网地址
    pub allow_private_addresses: bool,
}

/// 队列配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct QueueSettings {
    /// 任务列表键
    pub key: String,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否安装 Prometheus 记录器
    pub enabled: bool,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加内置默认值、`config/default`、`config/{APP_ENVIRONMENT}`
    /// 以及 `CRAWLGATE__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("CRAWLGATE").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 仅使用内置默认值构建配置
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let blocked: Vec<String> = DEFAULT_BLOCKED_DOMAINS
            .iter()
            .map(|d| d.to_string())
            .collect();

        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3002)?
            .set_default("redis.url", "redis://127.0.0.1:6379")?
            .set_default("crawl.limit", 1)?
            .set_default("crawl.abort_on_timeout", false)?
            .set_default("auth.enabled", true)?
            .set_default("rate_limiting.enabled", true)?
            .set_default("rate_limiting.crawl_rpm", 3)?
            .set_default("rate_limiting.default_rpm", 20)?
            .set_default("credits.default_balance", 100)?
            .set_default("blocklist.domains", blocked)?
            .set_default(
                "fetch.user_agent",
                "Mozilla/5.0 (compatible; crawlgate/1.0)",
            )?
            .set_default("fetch.allow_private_addresses", false)?
            .set_default("queue.key", "crawl:jobs")?
            .set_default("metrics.enabled", true)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
