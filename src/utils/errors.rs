// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::domain::models::task::DomainError;
use crate::domain::repositories::task_gateway::GatewayError;

/// 导入错误类型
///
/// 文件级错误：任意一种出现都会让整个导入直接终止，只产生一条面向用户的消息。
/// 行级错误不在这里，它们以 `RowRejection` 的形式作为数据返回。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("文件类型不正确，请上传 CSV 文件。")]
    WrongFileType,

    #[error("文件类型不明确，请确保文件扩展名为 .csv")]
    AmbiguousFileType,

    #[error("文件大小不能超过 {limit_mb}MB")]
    FileTooLarge { limit_mb: u64 },

    #[error("CSV 文件为空")]
    EmptyFile,

    #[error("CSV 文件必须包含以下列: 直播间ID, 标题, 播放url")]
    MissingColumns,

    #[error("导入失败: {0}")]
    Parse(String),
}

impl ImportError {
    /// 是否属于预期内的文件级校验失败（而非解析器异常）
    pub fn is_validation(&self) -> bool {
        !matches!(self, ImportError::Parse(_))
    }
}

/// 单任务与批量任务操作的错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TaskCommandError {
    /// 请求未通过本地校验，未向后端发出任何请求
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
