// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::body::Bytes;
use axum::http::StatusCode;
use download_center::domain::services::import_validator::ImportRules;
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use super::helpers::{
    create_test_app, create_test_app_with_rules, created_payloads, mount_create_task_echo,
    TASKS_PATH,
};

const HEADER: &str = "直播间ID,标题,播放url,直播间url\n";

#[tokio::test]
async fn single_row_import_submits_one_task() {
    let app = create_test_app().await;
    mount_create_task_echo(&app.backend).await;

    let body = format!("{}123,测试导入,http://a.com/v.m3u8,http://live.com/123\n", HEADER);
    let response = app
        .server
        .post("/v1/imports")
        .add_query_param("filename", "tasks.csv")
        .bytes(Bytes::from(body))
        .content_type("text/csv")
        .await;

    response.assert_status(StatusCode::OK);
    let result: Value = response.json();
    assert_eq!(result["success"], true);
    assert_eq!(result["message"], "成功导入 1 个任务。");
    assert_eq!(result["summary"]["succeeded"], 1);

    let payloads = created_payloads(&app.backend).await;
    assert_eq!(payloads.len(), 1);
    let payload = &payloads[0];
    assert_eq!(payload["liveroom_id"], "0000000123");
    assert_eq!(payload["liveroom_title"], "测试导入");
    assert_eq!(payload["resource_url"], "http://a.com/v.m3u8");
    assert_eq!(payload["resource_type"], "hls");
    assert_eq!(payload["liveroom_url"], "http://live.com/123");
    assert!(payload["video_id"]
        .as_str()
        .unwrap()
        .starts_with("0000000123_"));
    assert!(payload.get("row_index").is_none());
}

#[tokio::test]
async fn partial_import_reports_rejected_rows() {
    let app = create_test_app().await;
    mount_create_task_echo(&app.backend).await;

    let body = "直播间ID,标题,播放url\n\
                123,正确数据,http://valid.com/video.m3u8\n\
                ,缺少ID,http://invalid.com/video.m3u8\n\
                456,缺少URL,\n\
                789,完整数据2,http://valid2.com/video.mp4\n";
    let response = app
        .server
        .post("/v1/imports")
        .add_query_param("filename", "tasks.csv")
        .bytes(Bytes::from(body))
        .content_type("text/csv")
        .await;

    response.assert_status(StatusCode::OK);
    let result: Value = response.json();
    assert_eq!(result["summary"]["succeeded"], 2);
    assert_eq!(result["errors"].as_array().unwrap().len(), 2);
    assert_eq!(result["message"], "批量导入完成，成功2条，失败2条");

    let ids: Vec<_> = created_payloads(&app.backend)
        .await
        .iter()
        .map(|p| p["liveroom_id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["0000000123", "0000000789"]);
}

#[tokio::test]
async fn fully_rejected_import_returns_422_without_submission() {
    let app = create_test_app().await;
    mount_create_task_echo(&app.backend).await;

    let body = format!("{}123,非法URL测试,file:///etc/passwd,\n", HEADER);
    let response = app
        .server
        .post("/v1/imports")
        .add_query_param("filename", "tasks.csv")
        .bytes(Bytes::from(body))
        .content_type("text/csv")
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let result: Value = response.json();
    assert_eq!(result["errors"][0]["reason"], "不支持的协议: file:");
    assert!(created_payloads(&app.backend).await.is_empty());
}

#[tokio::test]
async fn backend_failures_are_counted_not_fatal() {
    let app = create_test_app().await;
    Mock::given(method("POST"))
        .and(path(TASKS_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&app.backend)
        .await;

    let body = format!(
        "{}1,a,http://a.com/1.m3u8,\n2,b,http://a.com/2.mp4,\n",
        HEADER
    );
    let response = app
        .server
        .post("/v1/imports")
        .add_query_param("filename", "tasks.csv")
        .bytes(Bytes::from(body))
        .content_type("text/csv")
        .await;

    response.assert_status(StatusCode::OK);
    let result: Value = response.json();
    assert_eq!(result["summary"]["failed"], 2);
    assert_eq!(result["summary"]["failures"][0]["error"], "服务器内部错误");
    assert_eq!(result["message"], "批量导入完成，成功0条，失败2条");
}

#[tokio::test]
async fn wrong_file_type_is_single_error() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/v1/imports")
        .add_query_param("filename", "test.zip")
        .bytes(Bytes::from_static(b"PK"))
        .content_type("application/zip")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let result: Value = response.json();
    assert_eq!(result["success"], false);
    assert_eq!(result["error"], "文件类型不正确，请上传 CSV 文件。");
}

#[tokio::test]
async fn oversize_file_is_rejected_before_parsing() {
    let app = create_test_app().await;

    let body = vec![b'a'; 5 * 1024 * 1024 + 1];
    let response = app
        .server
        .post("/v1/imports/preview")
        .add_query_param("filename", "large.csv")
        .bytes(Bytes::from(body))
        .content_type("text/csv")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let result: Value = response.json();
    assert_eq!(result["error"], "文件大小不能超过 5MB");
}

#[tokio::test]
async fn missing_columns_is_single_error() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/v1/imports/preview")
        .add_query_param("filename", "tasks.csv")
        .bytes(Bytes::from("错误的ID,错误的标题,错误的url\n123,t,http://a.com/v.m3u8\n"))
        .content_type("text/csv")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let result: Value = response.json();
    assert_eq!(
        result["error"],
        "CSV 文件必须包含以下列: 直播间ID, 标题, 播放url"
    );
}

#[tokio::test]
async fn preview_does_not_submit() {
    let app = create_test_app().await;
    mount_create_task_echo(&app.backend).await;

    let body = format!(
        "{}123,\"=HYPERLINK(\"\"http://evil.com\"\")\",https://a.com/v.m3u8,\n",
        HEADER
    );
    let response = app
        .server
        .post("/v1/imports/preview")
        .add_query_param("filename", "tasks.csv")
        .bytes(Bytes::from(body))
        .content_type("text/csv")
        .await;

    response.assert_status(StatusCode::OK);
    let preview: Value = response.json();
    assert_eq!(preview["valid_count"], 1);
    assert_eq!(preview["invalid_count"], 0);
    assert_eq!(
        preview["valid_rows"][0]["liveroom_title"],
        "'=HYPERLINK(\"http://evil.com\")"
    );
    assert!(created_payloads(&app.backend).await.is_empty());
}

#[tokio::test]
async fn empty_liveroom_id_policy_is_configurable() {
    let app = create_test_app_with_rules(ImportRules {
        allow_empty_liveroom_id: true,
        ..ImportRules::default()
    })
    .await;

    let body = format!("{},无ID,http://a.com/v.m3u8,\n", HEADER);
    let response = app
        .server
        .post("/v1/imports/preview")
        .add_query_param("filename", "tasks.csv")
        .bytes(Bytes::from(body))
        .content_type("text/csv")
        .await;

    response.assert_status(StatusCode::OK);
    let preview: Value = response.json();
    assert_eq!(preview["valid_rows"][0]["liveroom_id"], "0000000000");
}
