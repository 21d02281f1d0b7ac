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
use thiserror::Error;
use tracing::info;

use crate::{
    application::use_cases::{
        dispatch_router::{Dispatch, DispatchRouter},
        policy_gate::{GateDecision, PolicyGate, Rejection},
    },
    domain::models::{auth::Credentials, crawl::JobHandle},
    engines::{
        timeout_race::{RaceOutcome, TimeoutRaceExecutor},
        traits::DocumentProvider,
    },
    queue::job_queue::{JobQueue, QueueError},
    utils::errors::CollaboratorError,
};

#[derive(Error, Debug)]
pub enum CrawlUseCaseError {
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// 一次爬取请求的最终结果
#[derive(Debug)]
pub enum CrawlOutcome {
    /// 准入被拒绝
    Rejected(Rejection),
    /// 同步抓取结束（成功、超时或失败）
    Fetched(RaceOutcome),
    /// 异步任务已提交
    Queued(JobHandle),
}

pub struct CrawlUseCase {
    gate: PolicyGate,
    router: DispatchRouter,
    executor: TimeoutRaceExecutor,
    provider: Arc<dyn DocumentProvider>,
    queue: Arc<dyn JobQueue>,
}

impl CrawlUseCase {
    pub fn new(
        gate: PolicyGate,
        router: DispatchRouter,
        executor: TimeoutRaceExecutor,
        provider: Arc<dyn DocumentProvider>,
        queue: Arc<dyn JobQueue>,
    ) -> Self {
        Self {
            gate,
            router,
            executor,
            provider,
            queue,
        }
    }

    pub async fn crawl(
        &self,
        credentials: &Credentials,
        body: &[u8],
    ) -> Result<CrawlOutcome, CrawlUseCaseError> {
        let admission = match self.gate.admit(credentials, body).await? {
            GateDecision::Admitted(admission) => admission,
            GateDecision::Rejected(rejection) => return Ok(CrawlOutcome::Rejected(rejection)),
        };

        match self.router.route(&admission) {
            Dispatch::Sync {
                options,
                deadline_ms,
            } => {
                info!(
                    "Team {} fetching {} synchronously (deadline {}ms)",
                    admission.team_id, admission.request.url, deadline_ms
                );
                let outcome = self
                    .executor
                    .execute(self.provider.clone(), options, deadline_ms)
                    .await;
                Ok(CrawlOutcome::Fetched(outcome))
            }
            Dispatch::Async(job) => {
                let handle = self.queue.submit(job).await?;
                info!(
                    "Team {} crawl of {} accepted as job {}",
                    admission.team_id, admission.request.url, handle.id
                );
                Ok(CrawlOutcome::Queued(handle))
            }
        }
    }
}
