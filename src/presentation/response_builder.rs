// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::any::Any;
use tracing::error;

use crate::application::use_cases::crawl_use_case::{CrawlOutcome, CrawlUseCaseError};
use crate::engines::timeout_race::RaceOutcome;
use crate::infrastructure::metrics::record_crawl_outcome;

pub const TIMEOUT_MESSAGE: &str = "Timeout exceeded";

/// 将一次爬取请求的最终结果转换为唯一的HTTP响应
///
/// | 输入 | 响应 |
/// |---|---|
/// | 准入拒绝 | 拒绝状态码，`{error}` |
/// | 同步抓取成功 | 200，`{success: true, documents}` |
/// | 同步抓取超时 | 500，`{error: "Timeout exceeded"}` |
/// | 同步抓取失败 | 500，`{error}` |
/// | 任务提交成功 | 200，`{jobId}` |
/// | 其他错误 | 500，`{error}` |
pub fn build(result: Result<CrawlOutcome, CrawlUseCaseError>) -> Response {
    let (outcome, status, body) = match result {
        Ok(CrawlOutcome::Rejected(rejection)) => (
            "rejected",
            StatusCode::from_u16(rejection.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            error_body(rejection.reason),
        ),
        Ok(CrawlOutcome::Fetched(RaceOutcome::Success(documents))) => (
            "documents",
            StatusCode::OK,
            json!({ "success": true, "documents": documents }),
        ),
        Ok(CrawlOutcome::Fetched(RaceOutcome::TimedOut)) => (
            "timed_out",
            StatusCode::INTERNAL_SERVER_ERROR,
            error_body(TIMEOUT_MESSAGE),
        ),
        Ok(CrawlOutcome::Fetched(RaceOutcome::Failed(e))) => {
            error!("Synchronous fetch failed: {}", e);
            (
                "failed",
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body(e.to_string()),
            )
        }
        Ok(CrawlOutcome::Queued(handle)) => {
            ("job_accepted", StatusCode::OK, json!({ "jobId": handle.id }))
        }
        Err(e) => {
            error!("Crawl request failed: {}", e);
            (
                "failed",
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body(e.to_string()),
            )
        }
    };

    record_crawl_outcome(outcome);
    (status, Json(body)).into_response()
}

/// `CatchPanicLayer` 使用的兜底响应
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Internal server error".to_string()
    };

    error!("Request handler panicked: {}", message);
    record_crawl_outcome("failed");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(error_body(message))).into_response()
}

fn error_body(message: impl Into<String>) -> Value {
    json!({ "error": message.into() })
}
