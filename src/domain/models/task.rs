// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 下载任务实体
///
/// 表示后端下载服务中的一个工作单元：下载某个直播间的一份资源
/// （HLS 播放列表、MP4 文件或图片）。本服务不持久化任务，
/// 该结构体仅镜像后端 API 返回的数据。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// 任务唯一标识符
    pub id: String,
    /// 任务状态
    pub status: TaskStatus,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 视频ID，格式为 `<直播间ID>_<随机后缀>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    /// 直播间ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveroom_id: Option<String>,
    /// 直播间标题
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveroom_title: Option<String>,
    /// 资源URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_url: Option<String>,
    /// 资源类型
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    /// 下载进度（0-100）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    /// 更新时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

/// 资源类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// HLS 播放列表 (.m3u8)
    Hls,
    /// MP4 文件
    Mp4,
    /// 图片资源，仅手动创建任务时可用
    Image,
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ResourceType::Hls => write!(f, "hls"),
            ResourceType::Mp4 => write!(f, "mp4"),
            ResourceType::Image => write!(f, "image"),
        }
    }
}

impl FromStr for ResourceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hls" => Ok(ResourceType::Hls),
            "mp4" => Ok(ResourceType::Mp4),
            "image" => Ok(ResourceType::Image),
            other => Err(DomainError::ValidationError(format!(
                "无效的资源类型: {}，必须是: hls, mp4, image",
                other
            ))),
        }
    }
}

/// 任务状态枚举
///
/// 状态由后端维护，流转大致为：
/// Pending → Processing → Completed/PartialCompleted/Failed，
/// 任意未完成状态都可能变为 Cancelled。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// 等待中
    #[default]
    Pending,
    /// 下载中
    Processing,
    /// 已完成
    Completed,
    /// 部分完成，存在失败的子资源
    PartialCompleted,
    /// 已失败
    Failed,
    /// 已取消
    Cancelled,
}

impl TaskStatus {
    /// 任务是否仍在进行中
    pub fn is_in_progress(&self) -> bool {
        matches!(self, TaskStatus::Pending | TaskStatus::Processing)
    }

    /// 任务是否已结束（无论成功与否）
    pub fn is_finished(&self) -> bool {
        !self.is_in_progress()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Processing => write!(f, "processing"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::PartialCompleted => write!(f, "partial_completed"),
            TaskStatus::Failed => write!(f, "failed"),
            TaskStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "processing" => Ok(TaskStatus::Processing),
            "completed" => Ok(TaskStatus::Completed),
            "partial_completed" => Ok(TaskStatus::PartialCompleted),
            "failed" => Ok(TaskStatus::Failed),
            "cancelled" => Ok(TaskStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// 失败记录
///
/// 任务中下载失败的单个子资源（例如 HLS 的某个分片），
/// 可以独立于父任务进行重试或放弃。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FailureRecord {
    pub id: String,
    pub task_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_type: Option<String>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_count: Option<u32>,
    pub created_at: DateTime<FixedOffset>,
}

/// 已下载视频记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DownloadedVideo {
    pub id: String,
    pub task_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    pub created_at: DateTime<FixedOffset>,
}

/// 分页结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

/// 领域错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// 验证错误，当输入数据不符合领域规则时发生
    #[error("{0}")]
    ValidationError(String),
}
