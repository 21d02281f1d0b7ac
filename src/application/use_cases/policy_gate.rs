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

use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::dto::crawl_request::CrawlRequestDto;
use crate::domain::models::auth::{Credentials, RateLimiterMode};
use crate::domain::models::crawl::CrawlRequest;
use crate::domain::services::{
    auth_service::AuthService, blocklist_service::UrlBlocklist, credits_service::CreditsService,
};
use crate::utils::errors::CollaboratorError;

/// 单次爬取请求消耗的额度
pub const CRAWL_CREDIT_COST: i64 = 1;

pub const PAYMENT_REQUIRED_MESSAGE: &str = "Insufficient credits";

pub const BLOCKED_URL_MESSAGE: &str =
    "Social media scraping is currently not supported due to policy restrictions.";

/// 准入拒绝
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// HTTP状态码
    pub status: u16,
    /// 拒绝原因
    pub reason: String,
}

impl Rejection {
    pub fn new(status: u16, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
        }
    }
}

/// 准入通过的请求
#[derive(Debug, Clone, PartialEq)]
pub struct Admission {
    /// 认证得到的团队ID
    pub team_id: Uuid,
    /// 校验后的请求
    pub request: CrawlRequest,
}

/// 准入结论
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    Admitted(Admission),
    Rejected(Rejection),
}

/// 准入策略门
///
/// 依次执行认证、额度检查、参数校验、黑名单检查，任一步拒绝即返回。
/// 不保存任何跨请求状态。
pub struct PolicyGate {
    auth: Arc<dyn AuthService>,
    credits: Arc<dyn CreditsService>,
    blocklist: Arc<dyn UrlBlocklist>,
}

impl PolicyGate {
    pub fn new(
        auth: Arc<dyn AuthService>,
        credits: Arc<dyn CreditsService>,
        blocklist: Arc<dyn UrlBlocklist>,
    ) -> Self {
        Self {
            auth,
            credits,
            blocklist,
        }
    }

    /// 对请求执行准入检查
    ///
    /// # 参数
    ///
    /// * `credentials` - 请求凭据
    /// * `body` - 原始请求体（JSON），在额度检查之后才解析
    ///
    /// # 返回值
    ///
    /// * `Ok(GateDecision)` - 准入或拒绝
    /// * `Err(CollaboratorError)` - 协作服务故障
    pub async fn admit(
        &self,
        credentials: &Credentials,
        body: &[u8],
    ) -> Result<GateDecision, CollaboratorError> {
        // 1. 认证与限流
        let auth = self
            .auth
            .authenticate(credentials, RateLimiterMode::Crawl)
            .await?;
        let team_id = match (auth.is_authorized, auth.team_id) {
            (true, Some(team_id)) => team_id,
            (true, None) => {
                return Err(CollaboratorError::Auth(
                    "authorized context without a team id".to_string(),
                ))
            }
            (false, _) => {
                let status = auth.rejection_status.unwrap_or(401);
                let reason = auth
                    .rejection_reason
                    .unwrap_or_else(|| "Unauthorized".to_string());
                warn!("Authentication rejected with {}: {}", status, reason);
                return Ok(GateDecision::Rejected(Rejection::new(status, reason)));
            }
        };

        // 2. 额度
        let credits = self
            .credits
            .check_credits(team_id, CRAWL_CREDIT_COST)
            .await?;
        if !credits.sufficient {
            warn!(
                "Team {} failed credit check: {}",
                team_id,
                credits.message.as_deref().unwrap_or("no details")
            );
            return Ok(GateDecision::Rejected(Rejection::new(
                402,
                PAYMENT_REQUIRED_MESSAGE,
            )));
        }

        // 3. 参数校验
        let request = match CrawlRequestDto::from_body(body).and_then(|dto| dto.to_request()) {
            Ok(request) => request,
            Err(reason) => {
                debug!("Rejecting malformed crawl request: {}", reason);
                return Ok(GateDecision::Rejected(Rejection::new(400, reason)));
            }
        };

        // 4. 黑名单
        if self.blocklist.is_blocked(&request.url) {
            warn!("Team {} requested blocked url {}", team_id, request.url);
            return Ok(GateDecision::Rejected(Rejection::new(
                403,
                BLOCKED_URL_MESSAGE,
            )));
        }

        Ok(GateDecision::Admitted(Admission { team_id, request }))
    }
}
