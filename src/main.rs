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

use crawlgate::application::use_cases::crawl_use_case::CrawlUseCase;
use crawlgate::application::use_cases::dispatch_router::DispatchRouter;
use crawlgate::application::use_cases::policy_gate::PolicyGate;
use crawlgate::config::settings::Settings;
use crawlgate::engines::reqwest_engine::ReqwestDocumentProvider;
use crawlgate::engines::timeout_race::TimeoutRaceExecutor;
use crawlgate::infrastructure::cache::redis_client::RedisClient;
use crawlgate::infrastructure::metrics;
use crawlgate::infrastructure::services::api_key_auth_service::ApiKeyAuthService;
use crawlgate::infrastructure::services::credits_service_impl::InMemoryCreditsService;
use crawlgate::infrastructure::services::domain_blocklist::DomainBlocklist;
use crawlgate::presentation::routes;
use crawlgate::queue::job_queue::RedisJobQueue;
use crawlgate::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting crawlgate...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // Initialize Prometheus Metrics
    let metrics_handle = if settings.metrics.enabled {
        metrics::init_metrics()
    } else {
        None
    };

    // 3. Initialize Redis Client
    let redis_client = RedisClient::new(&settings.redis.url)?;
    info!("Redis client initialized");

    // 4. Initialize admission collaborators
    let auth = Arc::new(ApiKeyAuthService::new(
        &settings.auth,
        &settings.rate_limiting,
    ));
    let credits = Arc::new(InMemoryCreditsService::new(
        settings.credits.default_balance,
    ));
    let blocklist = Arc::new(DomainBlocklist::new(&settings.blocklist.domains));
    let gate = PolicyGate::new(auth, credits, blocklist);

    // 5. Initialize fetch and queue backends
    let provider = Arc::new(ReqwestDocumentProvider::new(
        &settings.fetch.user_agent,
        settings.fetch.allow_private_addresses,
    )?);
    let queue = Arc::new(RedisJobQueue::new(redis_client, settings.queue.key.clone()));

    let use_case = Arc::new(CrawlUseCase::new(
        gate,
        DispatchRouter::new(settings.crawl.limit),
        TimeoutRaceExecutor::new(settings.crawl.abort_on_timeout),
        provider,
        queue,
    ));

    // 6. Start HTTP server
    let app = routes::routes(use_case, metrics_handle);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
