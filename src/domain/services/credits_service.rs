// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::auth::CreditCheckResult;
use crate::utils::errors::CollaboratorError;

/// 额度服务特质
#[async_trait]
pub trait CreditsService: Send + Sync {
    /// 检查团队额度是否足以支付 `cost` 个单位
    ///
    /// 只做检查，不扣减额度。
    async fn check_credits(
        &self,
        team_id: Uuid,
        cost: i64,
    ) -> Result<CreditCheckResult, CollaboratorError>;
}
