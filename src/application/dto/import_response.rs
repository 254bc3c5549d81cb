// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::models::import::{ImportCandidate, ImportReport, RowRejection};
use crate::domain::models::task::Task;

/// 被拒绝行的展示结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowErrorDto {
    /// 行号，从 1 开始（不含表头）
    pub row: usize,
    pub reason: String,
    /// 形如 `第2行: URL不能为空`
    pub message: String,
}

impl From<&RowRejection> for RowErrorDto {
    fn from(rejection: &RowRejection) -> Self {
        Self {
            row: rejection.row_index + 1,
            reason: rejection.reason.clone(),
            message: rejection.display_line(),
        }
    }
}

/// 导入预览响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportPreviewDto {
    pub file_name: String,
    pub total_rows: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub valid_rows: Vec<ImportCandidate>,
    pub errors: Vec<RowErrorDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ImportPreviewDto {
    pub fn new(file_name: impl Into<String>, report: &ImportReport, warning: Option<String>) -> Self {
        Self {
            file_name: file_name.into(),
            total_rows: report.total_rows(),
            valid_count: report.accepted.len(),
            invalid_count: report.rejected.len(),
            valid_rows: report.accepted.clone(),
            errors: report.rejected.iter().map(RowErrorDto::from).collect(),
            warning,
        }
    }
}

/// 单条提交失败
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionFailure {
    pub row_index: usize,
    pub video_id: String,
    pub error: String,
}

/// 批量提交汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<SubmissionFailure>,
    pub created: Vec<Task>,
}

/// 导入执行结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportResultDto {
    pub success: bool,
    pub message: String,
    pub summary: BatchSummary,
    pub errors: Vec<RowErrorDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ImportResultDto {
    /// 所有行都被拒绝，没有提交任何任务
    pub fn is_fully_rejected(&self) -> bool {
        self.summary.total == 0 && !self.errors.is_empty()
    }
}
