// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::models::task::Task;

/// 批量任务操作请求DTO
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchOperationRequestDto {
    #[serde(default)]
    pub task_ids: Vec<String>,
    /// retry | delete | start
    pub action: String,
}

/// 单个任务操作成功
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItemSuccess {
    pub task_id: String,
    /// 删除操作没有返回数据
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Task>,
}

/// 单个任务操作失败
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItemError {
    pub task_id: String,
    pub error: String,
}

/// 批量操作结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchOperationResultDto {
    pub total: usize,
    pub success_count: usize,
    pub error_count: usize,
    pub successes: Vec<BatchItemSuccess>,
    pub errors: Vec<BatchItemError>,
}
