// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::models::import::{
    CsvRow, ImportCandidate, ImportReport, RowRejection, COLUMN_LIVEROOM_ID, COLUMN_LIVEROOM_URL,
    COLUMN_PLAY_URL, COLUMN_TITLE, REQUIRED_COLUMNS,
};
use crate::domain::services::csv_sanitizer::sanitize_for_csv;
use crate::domain::services::url_safety::{
    check_target, infer_resource_type, is_valid_page_url,
};
use crate::domain::services::video_id::{generate_video_id, is_valid_liveroom_id, pad_liveroom_id};
use crate::utils::errors::ImportError;

/// 默认文件大小上限：5 MiB
pub const DEFAULT_MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

const CSV_MIME_TYPES: [&str; 3] = ["text/csv", "application/csv", "application/vnd.ms-excel"];
const AMBIGUOUS_MIME_TYPES: [&str; 3] = ["", "text/plain", "application/octet-stream"];

/// 导入规则配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRules {
    /// 文件大小上限（字节）
    pub max_file_bytes: u64,
    /// 是否允许空的直播间ID（按 0 处理并补零）
    pub allow_empty_liveroom_id: bool,
}

impl Default for ImportRules {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            allow_empty_liveroom_id: false,
        }
    }
}

/// 上传文件的元信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadMeta {
    pub file_name: String,
    pub mime_type: String,
    pub size: u64,
}

/// 文件级预检结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileCheck {
    /// 文件类型明确，可以继续
    Accepted,
    /// 扩展名正确但 MIME 类型不明确，可以继续但需要提示
    AcceptedWithWarning(String),
}

impl FileCheck {
    pub fn warning(&self) -> Option<&str> {
        match self {
            FileCheck::Accepted => None,
            FileCheck::AcceptedWithWarning(w) => Some(w),
        }
    }
}

/// CSV 批量导入校验器
///
/// 纯函数式、可重入：不持有跨调用的状态。行与行之间互不依赖，
/// 输出的接受列表与拒绝列表都保持输入顺序。
#[derive(Debug, Clone, Default)]
pub struct CsvImportValidator {
    rules: ImportRules,
}

impl CsvImportValidator {
    pub fn new(rules: ImportRules) -> Self {
        Self { rules }
    }

    /// 解析前的文件级检查：类型、大小
    pub fn check_file(&self, meta: &UploadMeta) -> Result<FileCheck, ImportError> {
        let mime = normalize_mime(&meta.mime_type);
        let has_csv_extension = meta.file_name.to_lowercase().ends_with(".csv");

        let check = if has_csv_extension {
            if CSV_MIME_TYPES.contains(&mime.as_str()) {
                FileCheck::Accepted
            } else {
                FileCheck::AcceptedWithWarning(ImportError::AmbiguousFileType.to_string())
            }
        } else if AMBIGUOUS_MIME_TYPES.contains(&mime.as_str()) {
            return Err(ImportError::AmbiguousFileType);
        } else {
            return Err(ImportError::WrongFileType);
        };

        if meta.size > self.rules.max_file_bytes {
            return Err(ImportError::FileTooLarge {
                limit_mb: self.rules.max_file_bytes / (1024 * 1024),
            });
        }

        Ok(check)
    }

    /// 表头契约：不能为空，且必须包含全部必需列
    pub fn check_headers(&self, headers: &[String]) -> Result<(), ImportError> {
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(ImportError::EmptyFile);
        }
        let has_all = REQUIRED_COLUMNS
            .iter()
            .all(|required| headers.iter().any(|h| h.trim() == *required));
        if !has_all {
            return Err(ImportError::MissingColumns);
        }
        Ok(())
    }

    /// 校验整个文件的所有数据行
    ///
    /// 表头不合法或没有数据行时返回单个文件级错误；否则每一行要么进入
    /// `accepted`，要么进入 `rejected`。
    pub fn validate(
        &self,
        headers: &[String],
        rows: &[CsvRow],
    ) -> Result<ImportReport, ImportError> {
        self.check_headers(headers)?;
        if rows.is_empty() {
            return Err(ImportError::EmptyFile);
        }

        let mut report = ImportReport::default();
        for row in rows {
            match self.validate_row(row) {
                Ok(candidate) => report.accepted.push(candidate),
                Err(reason) => {
                    debug!(row = row.index, %reason, "CSV row rejected");
                    report.rejected.push(RowRejection::new(row.index, reason));
                }
            }
        }
        Ok(report)
    }

    /// 单行规则：全部通过才产出候选任务，否则返回第一个失败原因
    pub fn validate_row(&self, row: &CsvRow) -> Result<ImportCandidate, String> {
        let liveroom_id = self.normalize_liveroom_id(row.get(COLUMN_LIVEROOM_ID))?;

        let play_url = row.get(COLUMN_PLAY_URL).trim();
        let parsed = check_target(play_url)?;
        let resource_type = infer_resource_type(&parsed)
            .ok_or_else(|| "URL必须指向一个 .m3u8 或 .mp4 文件".to_string())?;

        // 标题按原样清理，前导空白不去掉
        let liveroom_title = sanitize_for_csv(row.get(COLUMN_TITLE)).into_owned();

        let liveroom_url = self.optional_page_url(row);

        let video_id = generate_video_id(&liveroom_id);

        Ok(ImportCandidate {
            row_index: row.index,
            liveroom_id,
            liveroom_title,
            resource_url: play_url.to_string(),
            resource_type,
            video_id,
            liveroom_url,
        })
    }

    /// 可选的直播间URL，无法解析时丢弃而不影响该行
    fn optional_page_url(&self, row: &CsvRow) -> Option<String> {
        match row.get(COLUMN_LIVEROOM_URL).trim() {
            "" => None,
            url if is_valid_page_url(url) => Some(sanitize_for_csv(url).into_owned()),
            url => {
                debug!(row = row.index, liveroom_url = %url, "Dropping unparseable liveroom url");
                None
            }
        }
    }

    fn normalize_liveroom_id(&self, raw: &str) -> Result<String, String> {
        let raw = raw.trim();
        if raw.is_empty() {
            if self.rules.allow_empty_liveroom_id {
                return Ok(pad_liveroom_id("0"));
            }
            return Err("直播间ID不能为空".to_string());
        }
        if !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("直播间ID格式无效: {}", raw));
        }
        let padded = pad_liveroom_id(raw);
        if !is_valid_liveroom_id(&padded) {
            return Err(format!("直播间ID格式无效: {}", raw));
        }
        Ok(padded)
    }
}

fn normalize_mime(mime: &str) -> String {
    mime.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

#[cfg(test)]
#[path = "import_validator_test.rs"]
mod tests;
