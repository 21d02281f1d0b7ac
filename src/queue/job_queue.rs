// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::domain::models::crawl::{JobDescriptor, JobHandle};
use crate::infrastructure::cache::redis_client::RedisClient;

/// 队列错误类型
#[derive(Error, Debug)]
pub enum QueueError {
    /// 后端存储错误
    #[error("Queue backend error: {0}")]
    Backend(String),

    /// 序列化失败
    #[error("Failed to serialize job: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 写入队列的任务信封
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueuedJob<'a> {
    id: &'a str,
    data: &'a JobDescriptor,
    created_at: DateTime<Utc>,
}

/// 将任务编码为队列中的JSON信封 `{id, data, createdAt}`
fn encode_job(
    id: &str,
    job: &JobDescriptor,
    created_at: DateTime<Utc>,
) -> Result<String, QueueError> {
    Ok(serde_json::to_string(&QueuedJob {
        id,
        data: job,
        created_at,
    })?)
}

/// 为任务分配新ID并生成待写入的信封
fn prepare_job(job: &JobDescriptor) -> Result<(JobHandle, String), QueueError> {
    let id = Uuid::new_v4().to_string();
    let payload = encode_job(&id, job, Utc::now())?;
    Ok((JobHandle { id }, payload))
}

/// 任务队列特质
///
/// 只负责提交，任务的后续生命周期由外部工作池管理
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// 提交任务
    async fn submit(&self, job: JobDescriptor) -> Result<JobHandle, QueueError>;
}

/// 基于 Redis 列表的任务队列
pub struct RedisJobQueue {
    /// Redis客户端
    redis: RedisClient,
    /// 列表键
    key: String,
}

impl RedisJobQueue {
    /// 创建新的 Redis 任务队列
    ///
    /// # 参数
    ///
    /// * `redis` - Redis客户端
    /// * `key` - 任务列表键
    pub fn new(redis: RedisClient, key: impl Into<String>) -> Self {
        Self {
            redis,
            key: key.into(),
        }
    }
}

#[async_trait]
impl JobQueue for RedisJobQueue {
    async fn submit(&self, job: JobDescriptor) -> Result<JobHandle, QueueError> {
        let (handle, payload) = prepare_job(&job)?;

        let depth = self
            .redis
            .lpush(&self.key, &payload)
            .await
            .map_err(|e| QueueError::Backend(e.to_string()))?;

        info!(
            "Queued {} job {} for team {} (queue depth {})",
            job.mode, handle.id, job.team_id, depth
        );
        Ok(handle)
    }
}
