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
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::collections::HashMap;
use std::num::NonZeroU32;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::settings::{AuthSettings, RateLimitingSettings};
use crate::domain::models::auth::{AuthContext, Credentials, RateLimiterMode};
use crate::domain::services::auth_service::AuthService;
use crate::utils::errors::CollaboratorError;

/// 基于API密钥的认证服务
///
/// 密钥来自配置；每个团队在每个限流类别下各有独立配额
pub struct ApiKeyAuthService {
    /// 是否启用认证
    enabled: bool,
    /// API密钥到团队ID的映射
    keys: HashMap<String, Uuid>,
    /// 爬取类请求的限流器
    crawl_limiter: Option<DefaultKeyedRateLimiter<Uuid>>,
    /// 其他请求的限流器
    default_limiter: Option<DefaultKeyedRateLimiter<Uuid>>,
}

impl ApiKeyAuthService {
    /// 创建新的认证服务
    ///
    /// # 参数
    ///
    /// * `auth` - 认证配置
    /// * `rate_limiting` - 速率限制配置
    ///
    /// # 返回值
    ///
    /// 返回新的认证服务实例
    pub fn new(auth: &AuthSettings, rate_limiting: &RateLimitingSettings) -> Self {
        let keys = auth
            .api_keys
            .iter()
            .map(|k| (k.key.clone(), k.team_id))
            .collect();

        let limiter = |rpm: u32| {
            NonZeroU32::new(rpm).map(|rpm| RateLimiter::keyed(Quota::per_minute(rpm)))
        };
        let (crawl_limiter, default_limiter) = if rate_limiting.enabled {
            (
                limiter(rate_limiting.crawl_rpm),
                limiter(rate_limiting.default_rpm),
            )
        } else {
            (None, None)
        };

        Self {
            enabled: auth.enabled,
            keys,
            crawl_limiter,
            default_limiter,
        }
    }

    fn limiter_for(&self, mode: RateLimiterMode) -> Option<&DefaultKeyedRateLimiter<Uuid>> {
        match mode {
            RateLimiterMode::Crawl => self.crawl_limiter.as_ref(),
            _ => self.default_limiter.as_ref(),
        }
    }
}

#[async_trait]
impl AuthService for ApiKeyAuthService {
    async fn authenticate(
        &self,
        credentials: &Credentials,
        mode: RateLimiterMode,
    ) -> Result<AuthContext, CollaboratorError> {
        let team_id = if self.enabled {
            let Some(api_key) = credentials.api_key.as_deref() else {
                return Ok(AuthContext::rejected(401, "Unauthorized"));
            };
            match self.keys.get(api_key) {
                Some(team_id) => *team_id,
                None => {
                    warn!("Unknown API key presented for {} request", mode);
                    return Ok(AuthContext::rejected(401, "Unauthorized: Invalid token"));
                }
            }
        } else {
            Uuid::nil()
        };

        if let Some(limiter) = self.limiter_for(mode) {
            if limiter.check_key(&team_id).is_err() {
                warn!("Team {} exceeded {} rate limit", team_id, mode);
                return Ok(AuthContext::rejected(
                    429,
                    format!(
                        "Rate limit exceeded for {} requests. Please wait and try again.",
                        mode
                    ),
                ));
            }
        }

        debug!("Authenticated team {} for {} request", team_id, mode);
        Ok(AuthContext::authorized(team_id))
    }
}
