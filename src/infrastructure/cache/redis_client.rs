// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Result;
use redis::AsyncCommands;

/// Redis客户端
///
/// 提供任务队列所需的异步 Redis 操作
#[derive(Clone)]
pub struct RedisClient {
    /// Redis客户端
    client: redis::Client,
}

impl RedisClient {
    /// 创建新的Redis客户端实例
    ///
    /// 只校验URL，不会立即建立连接。
    ///
    /// # 参数
    ///
    /// * `redis_url` - Redis连接URL
    ///
    /// # 返回值
    ///
    /// * `Ok(RedisClient)` - Redis客户端实例
    /// * `Err(anyhow::Error)` - URL无效
    pub fn new(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self { client })
    }

    /// 将值推入列表头部
    ///
    /// # 参数
    ///
    /// * `key` - 列表键
    /// * `value` - 值
    ///
    /// # 返回值
    ///
    /// * `Ok(i64)` - 推入后的列表长度
    /// * `Err(anyhow::Error)` - 操作失败
    pub async fn lpush(&self, key: &str, value: &str) -> Result<i64> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        let len: i64 = con.lpush(key, value).await?;
        Ok(len)
    }
}
