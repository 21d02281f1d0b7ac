// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::models::auth::CreditCheckResult;
use crate::domain::services::credits_service::CreditsService;
use crate::utils::errors::CollaboratorError;

/// 内存额度账本
///
/// 未出现过的团队按默认额度计算。扣减由计费流程负责，这里只读。
pub struct InMemoryCreditsService {
    balances: DashMap<Uuid, i64>,
    default_balance: i64,
}

impl InMemoryCreditsService {
    pub fn new(default_balance: i64) -> Self {
        Self {
            balances: DashMap::new(),
            default_balance,
        }
    }

    /// 设置团队额度
    pub fn set_balance(&self, team_id: Uuid, balance: i64) {
        self.balances.insert(team_id, balance);
    }

    /// 查询团队额度
    pub fn balance(&self, team_id: Uuid) -> i64 {
        self.balances
            .get(&team_id)
            .map(|b| *b)
            .unwrap_or(self.default_balance)
    }
}

#[async_trait]
impl CreditsService for InMemoryCreditsService {
    async fn check_credits(
        &self,
        team_id: Uuid,
        cost: i64,
    ) -> Result<CreditCheckResult, CollaboratorError> {
        let available = self.balance(team_id);
        if available >= cost {
            Ok(CreditCheckResult::sufficient())
        } else {
            Ok(CreditCheckResult::insufficient(format!(
                "Insufficient credits: available {}, required {}",
                available, cost
            )))
        }
    }
}
