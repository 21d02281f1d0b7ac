// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{
    create_test_app, create_test_app_with_options, ProviderScript, RecordingQueue,
};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use crawlgate::domain::models::crawl::CrawlMode;
use crawlgate::engines::traits::ProviderCrawlerOptions;
use serde_json::{json, Value};
use tower::util::ServiceExt;

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn crawl_request(api_key: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v0/crawl")
        .header(header::AUTHORIZATION, format!("Bearer {}", api_key))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// 单URL同步抓取成功
///
/// 文档直接在响应中返回，不提交任务
#[tokio::test]
async fn test_single_url_returns_documents() {
    let app = create_test_app(ProviderScript::Documents(vec![json!({ "text": "hi" })]));

    let response = app
        .server
        .post("/v0/crawl")
        .add_header("Authorization", format!("Bearer {}", app.api_key))
        .json(&json!({ "url": "http://a.test", "mode": "single_urls" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({ "success": true, "documents": [{ "text": "hi" }] })
    );

    let options = app.provider.last_options().unwrap();
    assert_eq!(options.mode, CrawlMode::SingleUrls);
    assert_eq!(options.urls, vec!["http://a.test".to_string()]);
    assert_eq!(
        options.crawler_options,
        ProviderCrawlerOptions { urls_only: true }
    );
    assert_eq!(options.page_options, json!({ "onlyMainContent": false }));
    assert!(app.queue.submitted().is_empty());
}

/// 同步抓取超时
///
/// 抓取一直不结束时，截止时间到达后返回超时错误
#[tokio::test(start_paused = true)]
async fn test_single_url_times_out() {
    let app = create_test_app(ProviderScript::Hang);

    let (status, body) = send(
        app.router.clone(),
        crawl_request(
            &app.api_key,
            r#"{"url":"http://a.test","mode":"single_urls","timeout":50}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Timeout exceeded" }));
    assert_eq!(app.provider.calls(), 1);
}

/// 截止时间不大于0时不启动抓取
#[tokio::test]
async fn test_non_positive_timeout_skips_fetch() {
    let app = create_test_app(ProviderScript::Documents(vec![json!({ "text": "hi" })]));

    let (status, body) = send(
        app.router.clone(),
        crawl_request(
            &app.api_key,
            r#"{"url":"http://a.test","mode":"single_urls","timeout":0}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Timeout exceeded" }));
    assert_eq!(app.provider.calls(), 0);
}

/// 同步抓取失败
#[tokio::test]
async fn test_single_url_fetch_failure() {
    let app = create_test_app(ProviderScript::Fail("upstream returned garbage".to_string()));

    let response = app
        .server
        .post("/v0/crawl")
        .add_header("Authorization", format!("Bearer {}", app.api_key))
        .json(&json!({ "url": "http://a.test", "mode": "single_urls" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body, json!({ "error": "upstream returned garbage" }));
}

/// 默认模式提交异步任务
#[tokio::test]
async fn test_crawl_mode_submits_job() {
    let app = create_test_app(ProviderScript::Hang);

    let response = app
        .server
        .post("/v0/crawl")
        .add_header("Authorization", format!("Bearer {}", app.api_key))
        .json(&json!({ "url": "http://a.test" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body, json!({ "jobId": "job-123" }));

    let submitted = app.queue.submitted();
    assert_eq!(submitted.len(), 1);
    let job = &submitted[0];
    assert_eq!(job.url, "http://a.test");
    assert_eq!(job.mode, CrawlMode::Crawl);
    assert_eq!(job.team_id, app.team_id);
    assert_eq!(job.origin, "api");
    assert_eq!(job.timeout, 20_000);
    assert_eq!(job.crawler_options, json!({}));
    assert_eq!(job.page_options, json!({ "onlyMainContent": false }));
    assert_eq!(app.provider.calls(), 0);
}

/// 单URL模式下的多个URL走异步路径
#[tokio::test]
async fn test_single_mode_with_multiple_urls_submits_job() {
    let app = create_test_app_with_options(
        ProviderScript::Hang,
        RecordingQueue::new("job-multi"),
        3,
    );

    let response = app
        .server
        .post("/v0/crawl")
        .add_header("Authorization", format!("Bearer {}", app.api_key))
        .json(&json!({
            "url": "http://a.test,http://b.test",
            "mode": "single_urls",
            "crawlerOptions": { "limit": 2 },
            "origin": "website"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body, json!({ "jobId": "job-multi" }));

    let job = &app.queue.submitted()[0];
    assert_eq!(job.mode, CrawlMode::SingleUrls);
    assert_eq!(job.timeout, 60_000);
    assert_eq!(job.crawler_options, json!({ "limit": 2 }));
    assert_eq!(job.origin, "website");
    assert_eq!(app.provider.calls(), 0);
}

/// 缺少URL返回400
#[tokio::test]
async fn test_missing_url_is_bad_request() {
    let app = create_test_app(ProviderScript::Hang);

    let response = app
        .server
        .post("/v0/crawl")
        .add_header("Authorization", format!("Bearer {}", app.api_key))
        .json(&json!({ "mode": "crawl" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body, json!({ "error": "Url is required" }));
    assert_eq!(app.provider.calls(), 0);
    assert!(app.queue.submitted().is_empty());
}

/// 未知模式返回400
#[tokio::test]
async fn test_unknown_mode_is_bad_request() {
    let app = create_test_app(ProviderScript::Hang);

    let response = app
        .server
        .post("/v0/crawl")
        .add_header("Authorization", format!("Bearer {}", app.api_key))
        .json(&json!({ "url": "http://a.test", "mode": "everything" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body, json!({ "error": "Invalid mode: everything" }));
}

/// 请求体不是合法JSON时返回400
#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = create_test_app(ProviderScript::Hang);

    let (status, body) = send(
        app.router.clone(),
        crawl_request(&app.api_key, "{\"url\": "),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(app.queue.submitted().is_empty());
}

/// 请求体问题不会跳过认证检查
///
/// 类型错误的请求体和缺少内容类型的请求在未认证时都返回401
#[tokio::test]
async fn test_malformed_body_without_credentials_is_unauthorized() {
    let app = create_test_app(ProviderScript::Hang);

    let typed_wrong = Request::builder()
        .method("POST")
        .uri("/v0/crawl")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"url":5}"#))
        .unwrap();
    let (status, body) = send(app.router.clone(), typed_wrong).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Unauthorized" }));

    let no_content_type = Request::builder()
        .method("POST")
        .uri("/v0/crawl")
        .body(Body::from(r#"{"url":"http://a.test"}"#))
        .unwrap();
    let (status, _) = send(app.router.clone(), no_content_type).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let empty = Request::builder()
        .method("POST")
        .uri("/v0/crawl")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app.router.clone(), empty).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert_eq!(app.provider.calls(), 0);
    assert!(app.queue.submitted().is_empty());
}

/// 类型错误的请求体在认证和额度检查之后返回400
#[tokio::test]
async fn test_wrong_field_type_is_bad_request_after_auth() {
    let app = create_test_app(ProviderScript::Hang);

    let (status, body) = send(
        app.router.clone(),
        crawl_request(&app.api_key, r#"{"url":5}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));

    app.credits.set_balance(app.team_id, 0);
    let (status, _) = send(
        app.router.clone(),
        crawl_request(&app.api_key, r#"{"url":5}"#),
    )
    .await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
}

/// 未声明内容类型的JSON请求体照常处理
#[tokio::test]
async fn test_body_without_content_type_is_accepted() {
    let app = create_test_app(ProviderScript::Hang);

    let request = Request::builder()
        .method("POST")
        .uri("/v0/crawl")
        .header(header::AUTHORIZATION, format!("Bearer {}", app.api_key))
        .body(Body::from(r#"{"url":"http://a.test"}"#))
        .unwrap();
    let (status, body) = send(app.router.clone(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "jobId": "job-123" }));
}

/// 额度不足返回402，且先于参数校验
#[tokio::test]
async fn test_insufficient_credits_is_payment_required() {
    let app = create_test_app(ProviderScript::Hang);
    app.credits.set_balance(app.team_id, 0);

    for body in [
        json!({ "url": "http://a.test", "mode": "single_urls" }),
        json!({ "mode": "crawl" }),
        json!({ "url": "https://facebook.com/page" }),
    ] {
        let response = app
            .server
            .post("/v0/crawl")
            .add_header("Authorization", format!("Bearer {}", app.api_key))
            .json(&body)
            .await;

        assert_eq!(response.status_code(), StatusCode::PAYMENT_REQUIRED);
        let body: Value = response.json();
        assert_eq!(body, json!({ "error": "Insufficient credits" }));
    }

    assert_eq!(app.provider.calls(), 0);
    assert!(app.queue.submitted().is_empty());
}

/// 黑名单URL返回403
#[tokio::test]
async fn test_blocked_url_is_forbidden() {
    let app = create_test_app(ProviderScript::Documents(vec![]));

    for url in [
        "https://facebook.com/page",
        "https://www.instagram.com/someone",
        "http://a.test,https://x.com/post",
    ] {
        let response = app
            .server
            .post("/v0/crawl")
            .add_header("Authorization", format!("Bearer {}", app.api_key))
            .json(&json!({ "url": url, "mode": "single_urls" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::FORBIDDEN, "{}", url);
        let body: Value = response.json();
        assert_eq!(
            body,
            json!({ "error": "Social media scraping is currently not supported due to policy restrictions." })
        );
    }

    assert_eq!(app.provider.calls(), 0);
    assert!(app.queue.submitted().is_empty());
}

/// 认证失败返回401，先于其他所有检查
#[tokio::test]
async fn test_unauthenticated_requests_are_rejected_first() {
    let app = create_test_app(ProviderScript::Hang);

    let no_header = app
        .server
        .post("/v0/crawl")
        .json(&json!({ "url": "https://facebook.com/page" }))
        .await;
    assert_eq!(no_header.status_code(), StatusCode::UNAUTHORIZED);

    let bad_key = app
        .server
        .post("/v0/crawl")
        .add_header("Authorization", "Bearer fc-wrong")
        .json(&json!({ "mode": "crawl" }))
        .await;
    assert_eq!(bad_key.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = bad_key.json();
    assert!(body["error"].as_str().unwrap().starts_with("Unauthorized"));

    assert_eq!(app.provider.calls(), 0);
    assert!(app.queue.submitted().is_empty());
}

/// 任务队列故障返回500
#[tokio::test]
async fn test_queue_failure_is_internal_error() {
    let app = create_test_app_with_options(ProviderScript::Hang, RecordingQueue::failing(), 1);

    let response = app
        .server
        .post("/v0/crawl")
        .add_header("Authorization", format!("Bearer {}", app.api_key))
        .json(&json!({ "url": "http://a.test", "mode": "sitemap" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({ "error": "Queue backend error: redis unavailable" })
    );
}
