// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;

use crate::domain::models::auth::{AuthContext, Credentials, RateLimiterMode};
use crate::utils::errors::CollaboratorError;

/// 认证服务特质
///
/// 校验凭据并按限流类别检查配额
#[async_trait]
pub trait AuthService: Send + Sync {
    /// 认证请求
    ///
    /// # 参数
    ///
    /// * `credentials` - 请求凭据
    /// * `mode` - 本次操作的限流类别
    ///
    /// # 返回值
    ///
    /// * `Ok(AuthContext)` - 认证结论（成功或拒绝）
    /// * `Err(CollaboratorError)` - 认证服务自身故障
    async fn authenticate(
        &self,
        credentials: &Credentials,
        mode: RateLimiterMode,
    ) -> Result<AuthContext, CollaboratorError>;
}
