// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use bytes::Bytes;
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::dto::import_response::{
    BatchSummary, ImportPreviewDto, ImportResultDto, RowErrorDto, SubmissionFailure,
};
use crate::domain::models::import::{ImportCandidate, ImportReport};
use crate::domain::repositories::task_gateway::TaskGateway;
use crate::domain::services::import_validator::{CsvImportValidator, ImportRules, UploadMeta};
use crate::infrastructure::csv::csv_reader::CsvDocument;
use crate::infrastructure::metrics;
use crate::utils::errors::ImportError;

// === Section: Upload ===

/// 一次上传的文件
#[derive(Debug, Clone)]
pub struct ImportUpload {
    pub file_name: String,
    pub mime_type: String,
    pub content: Bytes,
}

impl ImportUpload {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            content: content.into(),
        }
    }

    pub fn meta(&self) -> UploadMeta {
        UploadMeta {
            file_name: self.file_name.clone(),
            mime_type: self.mime_type.clone(),
            size: self.content.len() as u64,
        }
    }
}

/// 校验阶段的结果，尚未提交任何任务
#[derive(Debug, Clone)]
pub struct ImportPreview {
    pub file_name: String,
    pub report: ImportReport,
    pub warning: Option<String>,
}

impl ImportPreview {
    pub fn to_dto(&self) -> ImportPreviewDto {
        ImportPreviewDto::new(&self.file_name, &self.report, self.warning.clone())
    }
}

// === Section: Use Case Definition ===

pub struct ImportTasksUseCase<G> {
    gateway: Arc<G>,
    validator: CsvImportValidator,
}

// === Section: Implementation ===

impl<G: TaskGateway> ImportTasksUseCase<G> {
    pub fn new(gateway: Arc<G>, rules: ImportRules) -> Self {
        Self {
            gateway,
            validator: CsvImportValidator::new(rules),
        }
    }

    /// 检查、解析并校验上传的文件，不提交任何任务
    pub fn preview(&self, upload: &ImportUpload) -> Result<ImportPreview, ImportError> {
        self.validate_upload(upload).inspect_err(|e| {
            if e.is_validation() {
                info!(file = %upload.file_name, error = %e, "CSV import rejected");
            } else {
                warn!(file = %upload.file_name, error = %e, "CSV import could not be parsed");
            }
        })
    }

    fn validate_upload(&self, upload: &ImportUpload) -> Result<ImportPreview, ImportError> {
        let check = self.validator.check_file(&upload.meta())?;
        if let Some(warning) = check.warning() {
            warn!(file = %upload.file_name, mime = %upload.mime_type, "{}", warning);
        }

        let document = CsvDocument::parse(&upload.content)?;
        let report = self.validator.validate(&document.headers, &document.rows)?;

        metrics::record_validation(report.accepted.len(), report.rejected.len());
        info!(
            file = %upload.file_name,
            total = report.total_rows(),
            accepted = report.accepted.len(),
            rejected = report.rejected.len(),
            "CSV import validated"
        );

        Ok(ImportPreview {
            file_name: upload.file_name.clone(),
            report,
            warning: check.warning().map(str::to_string),
        })
    }

    /// 校验后逐条提交通过校验的行
    ///
    /// 某一条提交失败不会中断后续提交；全部被拒绝时不发出任何请求。
    pub async fn execute(&self, upload: &ImportUpload) -> Result<ImportResultDto, ImportError> {
        let preview = self.preview(upload)?;
        let summary = self.submit(&preview.report.accepted).await;
        let rejected = preview.report.rejected.len();
        let all_succeeded = summary.failed == 0 && !preview.report.has_rejections();

        let message = if all_succeeded {
            format!("成功导入 {} 个任务。", summary.succeeded)
        } else {
            format!(
                "批量导入完成，成功{}条，失败{}条",
                summary.succeeded,
                summary.failed + rejected
            )
        };
        info!(
            file = %upload.file_name,
            succeeded = summary.succeeded,
            failed = summary.failed,
            rejected,
            "CSV import finished"
        );

        Ok(ImportResultDto {
            success: all_succeeded,
            message,
            errors: preview.report.rejected.iter().map(RowErrorDto::from).collect(),
            summary,
            warning: preview.warning,
        })
    }

    /// 按输入顺序逐条调用 `create_task`
    pub async fn submit(&self, candidates: &[ImportCandidate]) -> BatchSummary {
        let mut summary = BatchSummary {
            total: candidates.len(),
            ..BatchSummary::default()
        };

        for candidate in candidates {
            match self.gateway.create_task(candidate).await {
                Ok(task) => {
                    metrics::record_submission(true);
                    summary.succeeded += 1;
                    summary.created.push(task);
                }
                Err(e) => {
                    metrics::record_submission(false);
                    warn!(video_id = %candidate.video_id, error = %e, "Task submission failed");
                    summary.failed += 1;
                    summary.failures.push(SubmissionFailure {
                        row_index: candidate.row_index,
                        video_id: candidate.video_id.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        summary
    }
}

#[cfg(test)]
#[path = "import_tasks_test.rs"]
mod tests;
