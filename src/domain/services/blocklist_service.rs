// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// URL黑名单特质
pub trait UrlBlocklist: Send + Sync {
    /// 判断URL是否被策略禁止抓取
    fn is_blocked(&self, url: &str) -> bool;
}
