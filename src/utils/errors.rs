// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 外部协作服务错误
///
/// 认证、额度等协作服务自身出错（而非给出拒绝结论）时返回
#[derive(Error, Debug)]
pub enum CollaboratorError {
    #[error("Authentication service error: {0}")]
    Auth(String),

    #[error("Credit service error: {0}")]
    Credits(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
