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
use std::time::{Duration, Instant};
use tokio::task::JoinError;
use tracing::{debug, warn};

use crate::domain::models::crawl::Document;
use crate::engines::traits::{DocumentProvider, EngineError, ProviderOptions};

/// 超时竞争结果
#[derive(Debug)]
pub enum RaceOutcome {
    /// 截止时间前抓取成功
    Success(Vec<Document>),
    /// 截止时间先到
    TimedOut,
    /// 截止时间前抓取失败
    Failed(EngineError),
}

/// 超时竞争执行器
///
/// 同时启动抓取任务和截止计时器，以先完成者为准。
pub struct TimeoutRaceExecutor {
    /// 超时后是否中止仍在运行的抓取任务（否则任其在后台结束，结果丢弃）
    abort_on_timeout: bool,
}

impl TimeoutRaceExecutor {
    pub fn new(abort_on_timeout: bool) -> Self {
        Self { abort_on_timeout }
    }

    /// 在截止时间内执行一次抓取
    ///
    /// # 参数
    ///
    /// * `provider` - 文档提供者
    /// * `options` - 提供者配置
    /// * `deadline_ms` - 截止时间（毫秒），不大于 0 时直接超时且不启动抓取
    ///
    /// # 返回值
    ///
    /// 先完成一方决定的结果
    pub async fn execute(
        &self,
        provider: Arc<dyn DocumentProvider>,
        options: ProviderOptions,
        deadline_ms: i64,
    ) -> RaceOutcome {
        if deadline_ms <= 0 {
            debug!("Deadline {}ms already expired, skipping fetch", deadline_ms);
            return RaceOutcome::TimedOut;
        }

        let deadline = Duration::from_millis(deadline_ms as u64);
        let provider_name = provider.name();
        let start = Instant::now();

        // The task owns everything it touches, so losing the race only drops the handle.
        let mut fetch = tokio::spawn(async move { provider.fetch_documents(&options).await });
        let timer = tokio::time::sleep(deadline);
        tokio::pin!(timer);

        let outcome = tokio::select! {
            joined = &mut fetch => settle(joined),
            _ = &mut timer => {
                if self.abort_on_timeout {
                    fetch.abort();
                }
                warn!(
                    "Provider {} exceeded deadline of {:?}, abandoning fetch",
                    provider_name, deadline
                );
                RaceOutcome::TimedOut
            }
        };

        metrics::histogram!("crawl_sync_fetch_seconds").record(start.elapsed().as_secs_f64());
        outcome
    }
}

fn settle(joined: Result<Result<Vec<Document>, EngineError>, JoinError>) -> RaceOutcome {
    match joined {
        Ok(Ok(documents)) => RaceOutcome::Success(documents),
        Ok(Err(e)) => RaceOutcome::Failed(e),
        Err(e) if e.is_panic() => RaceOutcome::Failed(EngineError::Aborted(panic_message(e))),
        Err(e) => RaceOutcome::Failed(EngineError::Aborted(e.to_string())),
    }
}

fn panic_message(err: JoinError) -> String {
    let payload = err.into_panic();
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "fetch task panicked".to_string()
    }
}
