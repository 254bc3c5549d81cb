// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::str::FromStr;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::application::dto::create_task_request::CreateTaskRequestDto;
use crate::domain::models::import::ImportCandidate;
use crate::domain::models::task::{DomainError, ResourceType, Task};
use crate::domain::repositories::task_gateway::TaskGateway;
use crate::domain::services::csv_sanitizer::sanitize_for_csv;
use crate::domain::services::url_safety::{
    check_target, infer_manual_resource_type, infer_resource_type,
};
use crate::domain::services::video_id::{
    generate_video_id, is_valid_liveroom_id, is_valid_video_id, pad_liveroom_id,
};
use crate::utils::errors::TaskCommandError;

/// 手动创建单个下载任务
pub struct CreateTaskUseCase<G> {
    gateway: Arc<G>,
}

impl<G: TaskGateway> CreateTaskUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, dto: CreateTaskRequestDto) -> Result<Task, TaskCommandError> {
        let candidate = self.build_candidate(dto)?;
        let task = self.gateway.create_task(&candidate).await?;
        info!(task_id = %task.id, video_id = %candidate.video_id, "Task created manually");
        Ok(task)
    }

    /// 校验并规范化请求，得到与导入行相同形状的候选任务
    pub fn build_candidate(
        &self,
        dto: CreateTaskRequestDto,
    ) -> Result<ImportCandidate, DomainError> {
        dto.validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        let raw_id = dto.liveroom_id.trim();
        if !raw_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid(format!("直播间ID格式无效: {}", raw_id)));
        }
        let liveroom_id = pad_liveroom_id(raw_id);
        if !is_valid_liveroom_id(&liveroom_id) {
            return Err(invalid(format!("直播间ID格式无效: {}", raw_id)));
        }

        let resource_url = dto.resource_url.trim().to_string();
        let parsed = check_target(&resource_url).map_err(invalid)?;

        let resource_type = match dto.resource_type.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => ResourceType::from_str(t)?,
            _ => infer_manual_resource_type(&resource_url)
                .ok_or_else(|| invalid("无法识别资源类型，请指定 resource_type"))?,
        };
        if resource_type != ResourceType::Image && infer_resource_type(&parsed).is_none() {
            return Err(invalid("URL必须指向一个 .m3u8 或 .mp4 文件"));
        }

        let video_id = match dto.video_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => {
                if !is_valid_video_id(id) {
                    return Err(invalid(format!("视频ID格式无效: {}", id)));
                }
                id.to_string()
            }
            _ => generate_video_id(&liveroom_id),
        };

        let liveroom_title = dto
            .liveroom_title
            .as_deref()
            .map(|t| sanitize_for_csv(t.trim()).into_owned())
            .unwrap_or_default();
        let liveroom_url = dto
            .liveroom_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(|u| sanitize_for_csv(u).into_owned());

        Ok(ImportCandidate {
            row_index: 0,
            liveroom_id,
            liveroom_title,
            resource_url,
            resource_type,
            video_id,
            liveroom_url,
        })
    }
}

fn invalid(message: impl Into<String>) -> DomainError {
    DomainError::ValidationError(message.into())
}
