// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::UTF_8;
use std::collections::HashMap;

use crate::domain::models::import::CsvRow;
use crate::utils::errors::ImportError;

/// 解析后的 CSV 文档
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvDocument {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

impl CsvDocument {
    /// 从上传的原始字节解析 CSV
    ///
    /// 输入按 UTF-8 解码并去掉 BOM；要求有表头行；只去掉表头两端空白，
    /// 数据单元格保持原样；允许各行长度不一致，缺失的单元格视为空字符串；
    /// 完全空白的行被跳过。
    pub fn parse(bytes: &[u8]) -> Result<Self, ImportError> {
        let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
        if had_errors {
            return Err(ImportError::Parse("文件不是有效的 UTF-8 编码".to_string()));
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(b',')
            .trim(Trim::Headers)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ImportError::Parse(format!("无法读取表头: {}", e)))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for (line, result) in reader.records().enumerate() {
            let record =
                result.map_err(|e| ImportError::Parse(format!("第{}行解析失败: {}", line + 1, e)))?;
            if is_blank(&record) {
                continue;
            }
            rows.push(to_row(rows.len(), &headers, &record));
        }

        Ok(Self { headers, rows })
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

fn to_row(index: usize, headers: &[String], record: &StringRecord) -> CsvRow {
    let fields: HashMap<String, String> = headers
        .iter()
        .enumerate()
        .filter(|(_, header)| !header.is_empty())
        .map(|(idx, header)| (header.clone(), record.get(idx).unwrap_or("").to_string()))
        .collect();
    CsvRow::new(index, fields)
}
