// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::models::task::ResourceType;

/// 直播间ID列
pub const COLUMN_LIVEROOM_ID: &str = "直播间ID";
/// 标题列
pub const COLUMN_TITLE: &str = "标题";
/// 播放url列
pub const COLUMN_PLAY_URL: &str = "播放url";
/// 直播间url列（可选）
pub const COLUMN_LIVEROOM_URL: &str = "直播间url";

/// 导入文件必须包含的列，顺序即错误信息中的顺序
pub const REQUIRED_COLUMNS: [&str; 3] = [COLUMN_LIVEROOM_ID, COLUMN_TITLE, COLUMN_PLAY_URL];

/// CSV 中的一行原始数据
///
/// 列名到原始字符串值的映射，保留其在数据行中的序号（从 0 开始，不含表头）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CsvRow {
    pub index: usize,
    pub fields: HashMap<String, String>,
}

impl CsvRow {
    pub fn new(index: usize, fields: HashMap<String, String>) -> Self {
        Self { index, fields }
    }

    /// 从 `(列名, 值)` 对构造一行，主要用于测试和手工拼装
    pub fn from_pairs<I, K, V>(index: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { index, fields }
    }

    /// 读取某列的值，缺失的列视为空字符串
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }
}

/// 通过校验的导入候选任务
///
/// 字段名与任务创建接口的请求体一致，可直接序列化后提交。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportCandidate {
    /// 来源数据行序号，不提交给后端
    #[serde(skip)]
    pub row_index: usize,
    /// 补零到 10 位的直播间ID
    pub liveroom_id: String,
    /// 经过 CSV 注入清理的标题
    pub liveroom_title: String,
    pub resource_url: String,
    pub resource_type: ResourceType,
    pub video_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveroom_url: Option<String>,
}

/// 被拒绝的行及原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRejection {
    pub row_index: usize,
    pub reason: String,
}

impl RowRejection {
    pub fn new(row_index: usize, reason: impl Into<String>) -> Self {
        Self {
            row_index,
            reason: reason.into(),
        }
    }

    /// 面向用户的单行描述，行号从 1 开始
    pub fn display_line(&self) -> String {
        format!("第{}行: {}", self.row_index + 1, self.reason)
    }
}

/// 单个 URL 的校验结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlValidation {
    pub is_valid: bool,
    pub reason: String,
}

impl UrlValidation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            reason: String::new(),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            reason: reason.into(),
        }
    }
}

/// 一次导入校验的结果
///
/// `accepted` 与 `rejected` 恰好划分所有输入行，且都保持输入顺序。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub accepted: Vec<ImportCandidate>,
    pub rejected: Vec<RowRejection>,
}

impl ImportReport {
    pub fn total_rows(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }

    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }
}
