// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::DateTime;
use std::collections::HashSet;
use std::sync::Mutex;

use crate::domain::models::import::ImportCandidate;
use crate::domain::models::task::{DownloadedVideo, FailureRecord, Page, Task, TaskStatus};
use crate::domain::repositories::task_gateway::{
    FailureQuery, GatewayError, TaskGateway, TaskQuery, VideoQuery,
};

/// 记录调用顺序的内存网关
///
/// `failing` 中的键（创建时为直播间ID，其它操作为任务ID）会返回业务错误。
#[derive(Default)]
pub struct MockTaskGateway {
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl MockTaskGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            failing: keys.into_iter().map(Into::into).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, op: &str, key: &str) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(format!("{}:{}", op, key));
        if self.failing.contains(key) {
            return Err(GatewayError::Api {
                code: 500,
                message: format!("模拟失败: {}", key),
            });
        }
        Ok(())
    }
}

pub fn task(id: &str) -> Task {
    Task {
        id: id.to_string(),
        status: TaskStatus::Pending,
        created_at: DateTime::parse_from_rfc3339("2025-01-01T08:00:00+08:00").unwrap(),
        video_id: None,
        liveroom_id: None,
        liveroom_title: None,
        resource_url: None,
        resource_type: None,
        progress: None,
        updated_at: None,
    }
}

#[async_trait]
impl TaskGateway for MockTaskGateway {
    async fn create_task(&self, candidate: &ImportCandidate) -> Result<Task, GatewayError> {
        self.record("create", &candidate.liveroom_id)?;
        let mut created = task(&format!("task-{}", candidate.video_id));
        created.video_id = Some(candidate.video_id.clone());
        created.liveroom_id = Some(candidate.liveroom_id.clone());
        created.liveroom_title = Some(candidate.liveroom_title.clone());
        created.resource_url = Some(candidate.resource_url.clone());
        created.resource_type = Some(candidate.resource_type);
        Ok(created)
    }

    async fn list_tasks(&self, _query: &TaskQuery) -> Result<Page<Task>, GatewayError> {
        self.record("list", "")?;
        Ok(Page::default())
    }

    async fn get_task(&self, task_id: &str) -> Result<Task, GatewayError> {
        self.record("get", task_id)?;
        Ok(task(task_id))
    }

    async fn delete_task(&self, task_id: &str) -> Result<(), GatewayError> {
        self.record("delete", task_id)
    }

    async fn start_task(&self, task_id: &str) -> Result<Task, GatewayError> {
        self.record("start", task_id)?;
        let mut started = task(task_id);
        started.status = TaskStatus::Processing;
        Ok(started)
    }

    async fn retry_task(&self, task_id: &str) -> Result<Task, GatewayError> {
        self.record("retry", task_id)?;
        Ok(task(task_id))
    }

    async fn list_failures(
        &self,
        task_id: Option<&str>,
        _query: &FailureQuery,
    ) -> Result<Page<FailureRecord>, GatewayError> {
        self.record("list_failures", task_id.unwrap_or_default())?;
        Ok(Page::default())
    }

    async fn retry_failure(
        &self,
        _task_id: Option<&str>,
        failure_id: &str,
    ) -> Result<FailureRecord, GatewayError> {
        self.record("retry_failure", failure_id)?;
        Err(GatewayError::Decode("not supported by mock".into()))
    }

    async fn abandon_failure(
        &self,
        _task_id: Option<&str>,
        failure_id: &str,
    ) -> Result<FailureRecord, GatewayError> {
        self.record("abandon_failure", failure_id)?;
        Err(GatewayError::Decode("not supported by mock".into()))
    }

    async fn list_videos(
        &self,
        task_id: Option<&str>,
        _query: &VideoQuery,
    ) -> Result<Page<DownloadedVideo>, GatewayError> {
        self.record("list_videos", task_id.unwrap_or_default())?;
        Ok(Page::default())
    }
}
