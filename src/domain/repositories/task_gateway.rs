// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::import::ImportCandidate;
use crate::domain::models::task::{
    DownloadedVideo, FailureRecord, Page, ResourceType, Task, TaskStatus,
};

/// 网关错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// HTTP 状态码错误
    #[error("{message}")]
    Http { status: u16, message: String },
    /// 后端返回的业务错误码
    #[error("{message}")]
    Api { code: i64, message: String },
    /// 响应体无法按预期结构解码
    #[error("响应解析失败: {0}")]
    Decode(String),
    /// 请求超时
    #[error("请求超时，请检查网络连接")]
    Timeout,
    /// 网络层错误
    #[error("网络连接错误，请检查网络: {0}")]
    Transport(String),
    /// 调用参数不合法，请求未发出
    #[error("{0}")]
    InvalidArgument(String),
}

/// 默认页码
pub const DEFAULT_PAGE: u32 = 1;
/// 默认每页条数
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// 分页与排序参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paging {
    pub page: u32,
    pub size: u32,
    pub sort: Option<String>,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

impl Paging {
    fn push_pairs(&self, pairs: &mut Vec<(String, String)>) {
        pairs.push(("page".into(), self.page.to_string()));
        pairs.push(("size".into(), self.size.to_string()));
        push_filter(pairs, "sort", self.sort.as_deref());
    }
}

/// 任务列表查询参数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskQuery {
    pub paging: Paging,
    pub status: Option<TaskStatus>,
    pub resource_type: Option<ResourceType>,
    pub liveroom_id: Option<String>,
    pub search: Option<String>,
}

impl TaskQuery {
    /// 转换为查询字符串参数，空值会被过滤，避免后端校验失败
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        self.paging.push_pairs(&mut pairs);
        push_filter(&mut pairs, "status", self.status.map(|s| s.to_string()).as_deref());
        push_filter(
            &mut pairs,
            "resource_type",
            self.resource_type.map(|t| t.to_string()).as_deref(),
        );
        push_filter(&mut pairs, "liveroom_id", self.liveroom_id.as_deref());
        push_filter(&mut pairs, "search", self.search.as_deref());
        pairs
    }
}

/// 失败记录查询参数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FailureQuery {
    pub paging: Paging,
    pub status: Option<String>,
    pub failure_type: Option<String>,
}

impl FailureQuery {
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        self.paging.push_pairs(&mut pairs);
        push_filter(&mut pairs, "status", self.status.as_deref());
        push_filter(&mut pairs, "failure_type", self.failure_type.as_deref());
        pairs
    }
}

/// 已下载视频查询参数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoQuery {
    pub paging: Paging,
    pub resource_type: Option<ResourceType>,
}

impl VideoQuery {
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        self.paging.push_pairs(&mut pairs);
        push_filter(
            &mut pairs,
            "resource_type",
            self.resource_type.map(|t| t.to_string()).as_deref(),
        );
        pairs
    }
}

fn push_filter(pairs: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        pairs.push((key.to_string(), value.to_string()));
    }
}

/// 下载服务后端网关
///
/// 失败记录相关操作中 `task_id` 为 `None` 时访问全局接口。
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// 创建下载任务
    async fn create_task(&self, candidate: &ImportCandidate) -> Result<Task, GatewayError>;
    /// 分页查询任务
    async fn list_tasks(&self, query: &TaskQuery) -> Result<Page<Task>, GatewayError>;
    /// 获取任务详情
    async fn get_task(&self, task_id: &str) -> Result<Task, GatewayError>;
    /// 删除/取消任务
    async fn delete_task(&self, task_id: &str) -> Result<(), GatewayError>;
    /// 开始下载任务
    async fn start_task(&self, task_id: &str) -> Result<Task, GatewayError>;
    /// 重试任务
    async fn retry_task(&self, task_id: &str) -> Result<Task, GatewayError>;
    /// 分页查询失败记录
    async fn list_failures(
        &self,
        task_id: Option<&str>,
        query: &FailureQuery,
    ) -> Result<Page<FailureRecord>, GatewayError>;
    /// 重试单个失败资源
    async fn retry_failure(
        &self,
        task_id: Option<&str>,
        failure_id: &str,
    ) -> Result<FailureRecord, GatewayError>;
    /// 放弃单个失败资源
    async fn abandon_failure(
        &self,
        task_id: Option<&str>,
        failure_id: &str,
    ) -> Result<FailureRecord, GatewayError>;
    /// 分页查询已下载视频
    async fn list_videos(
        &self,
        task_id: Option<&str>,
        query: &VideoQuery,
    ) -> Result<Page<DownloadedVideo>, GatewayError>;
}
