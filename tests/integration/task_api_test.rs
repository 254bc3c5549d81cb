// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use super::helpers::{create_test_app, created_payloads, mount_create_task_echo, task_json};

#[tokio::test]
async fn create_task_returns_201() {
    let app = create_test_app().await;
    mount_create_task_echo(&app.backend).await;

    let response = app
        .server
        .post("/v1/tasks")
        .json(&json!({
            "resource_url": "https://cdn.example.com/cover.png",
            "liveroom_id": "987654321",
            "liveroom_title": "+封面"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let task: Value = response.json();
    assert_eq!(task["resource_type"], "image");

    let payloads = created_payloads(&app.backend).await;
    assert_eq!(payloads[0]["liveroom_id"], "0987654321");
    assert_eq!(payloads[0]["liveroom_title"], "'+封面");
}

#[tokio::test]
async fn create_task_rejects_private_address() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/v1/tasks")
        .json(&json!({
            "resource_url": "http://10.0.0.8/live.m3u8",
            "liveroom_id": "123"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "禁止使用私有网络地址");
    assert!(created_payloads(&app.backend).await.is_empty());
}

#[tokio::test]
async fn create_task_surfaces_backend_error() {
    let app = create_test_app().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/download/tasks"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 409, "message": "视频ID已存在"})),
        )
        .mount(&app.backend)
        .await;

    let response = app
        .server
        .post("/v1/tasks")
        .json(&json!({
            "resource_url": "https://cdn.example.com/v.m3u8",
            "liveroom_id": "123",
            "video_id": "0000000123_1234"
        }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["error"], "视频ID已存在");
}

#[tokio::test]
async fn batch_retry_continues_after_failure() {
    let app = create_test_app().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/download/tasks/t1/retry"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 200, "data": task_json("t1")})),
        )
        .mount(&app.backend)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/download/tasks/t2/retry"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&app.backend)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/download/tasks/t3/retry"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 200, "data": task_json("t3")})),
        )
        .mount(&app.backend)
        .await;

    let response = app
        .server
        .post("/v1/tasks/batch")
        .json(&json!({"task_ids": ["t1", "t2", "t3"], "action": "retry"}))
        .await;

    response.assert_status(StatusCode::OK);
    let result: Value = response.json();
    assert_eq!(result["total"], 3);
    assert_eq!(result["success_count"], 2);
    assert_eq!(result["error_count"], 1);
    assert_eq!(result["errors"][0]["task_id"], "t2");
    assert_eq!(result["errors"][0]["error"], "请求的资源不存在");
}

#[tokio::test]
async fn batch_with_empty_ids_is_bad_request() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/v1/tasks/batch")
        .json(&json!({"task_ids": [], "action": "delete"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "任务ID列表不能为空");
}
