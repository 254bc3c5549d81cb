// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::config::settings::BackendSettings;
use crate::domain::models::import::ImportCandidate;
use crate::domain::models::task::{DownloadedVideo, FailureRecord, Page, Task};
use crate::domain::repositories::task_gateway::{
    FailureQuery, GatewayError, TaskGateway, TaskQuery, VideoQuery,
};
use crate::infrastructure::http::api_envelope::ApiEnvelope;
use crate::infrastructure::http::in_flight::InFlightTracker;

const TASKS_PATH: &str = "api/v1/download/tasks";
const FAILURES_PATH: &str = "api/v1/download/failures";
const VIDEOS_PATH: &str = "api/v1/download/videos";

/// 下载服务后端客户端
///
/// 所有请求共享一个 reqwest 连接池，并通过 `InFlightTracker` 统计在途请求。
#[derive(Debug, Clone)]
pub struct DownloadApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
    in_flight: InFlightTracker,
}

impl DownloadApiClient {
    /// 根据后端配置创建客户端
    pub fn new(settings: &BackendSettings) -> Result<Self, GatewayError> {
        let base_url = normalize_base_url(&settings.base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("download-center/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            token: settings
                .token
                .clone()
                .filter(|t| !t.trim().is_empty()),
            in_flight: InFlightTracker::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// 在途请求计数器的句柄
    pub fn in_flight(&self) -> InFlightTracker {
        self.in_flight.clone()
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let path = segments.join("/");
        self.base_url
            .join(&path)
            .map_err(|e| GatewayError::InvalidArgument(format!("无效的请求路径 {}: {}", path, e)))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// 发送请求并解码统一响应信封
    async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Option<T>, GatewayError> {
        let _guard = self.in_flight.acquire();

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;

        if !status.is_success() {
            let error = http_status_error(status.as_u16(), &body);
            warn!(status = status.as_u16(), error = %error, "Backend request failed");
            return Err(error);
        }
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        ApiEnvelope::<T>::decode(&body)?.into_result()
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(String, String)],
    ) -> Result<T, GatewayError> {
        debug!(%url, "GET");
        self.execute::<T>(self.request(Method::GET, url).query(query))
            .await?
            .ok_or_else(missing_data)
    }

    async fn post_data<T: DeserializeOwned>(&self, url: Url) -> Result<T, GatewayError> {
        debug!(%url, "POST");
        self.execute::<T>(self.request(Method::POST, url))
            .await?
            .ok_or_else(missing_data)
    }

    fn failure_base(&self, task_id: Option<&str>) -> Result<Vec<String>, GatewayError> {
        match task_id {
            Some(id) => Ok(vec![
                TASKS_PATH.to_string(),
                encode_id(id, "任务ID不能为空")?,
                "failures".to_string(),
            ]),
            None => Ok(vec![FAILURES_PATH.to_string()]),
        }
    }

    async fn failure_action(
        &self,
        task_id: Option<&str>,
        failure_id: &str,
        action: &str,
    ) -> Result<FailureRecord, GatewayError> {
        let empty_message = if task_id.is_some() {
            "任务ID和失败记录ID不能为空"
        } else {
            "失败记录ID不能为空"
        };
        let failure_id = encode_id(failure_id, empty_message)?;
        if task_id.is_some_and(|id| id.trim().is_empty()) {
            return Err(GatewayError::InvalidArgument(empty_message.to_string()));
        }
        let mut segments = self.failure_base(task_id)?;
        segments.push(failure_id);
        segments.push(action.to_string());
        let refs: Vec<&str> = segments.iter().map(String::as_str).collect();
        let url = self.endpoint(&refs)?;
        self.post_data(url).await
    }
}

#[async_trait]
impl TaskGateway for DownloadApiClient {
    async fn create_task(&self, candidate: &ImportCandidate) -> Result<Task, GatewayError> {
        let url = self.endpoint(&[TASKS_PATH])?;
        debug!(video_id = %candidate.video_id, "Creating download task");
        self.execute::<Task>(self.request(Method::POST, url).json(candidate))
            .await?
            .ok_or_else(missing_data)
    }

    async fn list_tasks(&self, query: &TaskQuery) -> Result<Page<Task>, GatewayError> {
        let url = self.endpoint(&[TASKS_PATH])?;
        self.get_data(url, &query.to_query_pairs()).await
    }

    async fn get_task(&self, task_id: &str) -> Result<Task, GatewayError> {
        let id = encode_id(task_id, "任务ID不能为空")?;
        let url = self.endpoint(&[TASKS_PATH, id.as_str()])?;
        self.get_data(url, &[]).await
    }

    async fn delete_task(&self, task_id: &str) -> Result<(), GatewayError> {
        let id = encode_id(task_id, "任务ID不能为空")?;
        let url = self.endpoint(&[TASKS_PATH, id.as_str()])?;
        debug!(%url, "DELETE");
        self.execute::<serde_json::Value>(self.request(Method::DELETE, url))
            .await
            .map(|_| ())
    }

    async fn start_task(&self, task_id: &str) -> Result<Task, GatewayError> {
        let id = encode_id(task_id, "任务ID不能为空")?;
        let url = self.endpoint(&[TASKS_PATH, id.as_str(), "start"])?;
        self.post_data(url).await
    }

    async fn retry_task(&self, task_id: &str) -> Result<Task, GatewayError> {
        let id = encode_id(task_id, "任务ID不能为空")?;
        let url = self.endpoint(&[TASKS_PATH, id.as_str(), "retry"])?;
        self.post_data(url).await
    }

    async fn list_failures(
        &self,
        task_id: Option<&str>,
        query: &FailureQuery,
    ) -> Result<Page<FailureRecord>, GatewayError> {
        let segments = self.failure_base(task_id)?;
        let refs: Vec<&str> = segments.iter().map(String::as_str).collect();
        let url = self.endpoint(&refs)?;
        self.get_data(url, &query.to_query_pairs()).await
    }

    async fn retry_failure(
        &self,
        task_id: Option<&str>,
        failure_id: &str,
    ) -> Result<FailureRecord, GatewayError> {
        self.failure_action(task_id, failure_id, "retry").await
    }

    async fn abandon_failure(
        &self,
        task_id: Option<&str>,
        failure_id: &str,
    ) -> Result<FailureRecord, GatewayError> {
        self.failure_action(task_id, failure_id, "abandon").await
    }

    async fn list_videos(
        &self,
        task_id: Option<&str>,
        query: &VideoQuery,
    ) -> Result<Page<DownloadedVideo>, GatewayError> {
        let url = match task_id {
            Some(task_id) => {
                let id = encode_id(task_id, "任务ID不能为空")?;
                self.endpoint(&[TASKS_PATH, id.as_str(), "videos"])?
            }
            None => self.endpoint(&[VIDEOS_PATH])?,
        };
        self.get_data(url, &query.to_query_pairs()).await
    }
}

fn normalize_base_url(raw: &str) -> Result<Url, GatewayError> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Url::parse(&raw)
        .map_err(|e| GatewayError::InvalidArgument(format!("后端地址无效 {}: {}", raw, e)))
}

fn encode_id(id: &str, empty_message: &str) -> Result<String, GatewayError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(GatewayError::InvalidArgument(empty_message.to_string()));
    }
    Ok(urlencoding::encode(id).into_owned())
}

fn missing_data() -> GatewayError {
    GatewayError::Decode("响应缺少 data 字段".to_string())
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Transport(e.to_string())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// 将非 2xx 状态码映射为面向用户的错误信息
pub fn http_status_error(status: u16, body: &[u8]) -> GatewayError {
    let message = match status {
        401 => "登录已过期，请重新登录".to_string(),
        403 => "没有权限访问该资源".to_string(),
        404 => "请求的资源不存在".to_string(),
        500 => "服务器内部错误".to_string(),
        _ => serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("请求失败 ({})", status)),
    };
    GatewayError::Http { status, message }
}

#[cfg(test)]
#[path = "download_api_client_test.rs"]
mod tests;
