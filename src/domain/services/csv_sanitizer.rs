// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::borrow::Cow;

/// 表格软件会当作公式解析的首字符
const FORMULA_PREFIXES: [char; 4] = ['=', '+', '-', '@'];

/// 清理 CSV 单元格文本，防止公式注入
///
/// 以 `=`、`+`、`-`、`@` 开头的文本前加单引号，使表格软件将其视为普通文本。
/// 其余文本（包括空字符串）原样返回。
pub fn sanitize_for_csv(text: &str) -> Cow<'_, str> {
    match text.chars().next() {
        Some(first) if FORMULA_PREFIXES.contains(&first) => Cow::Owned(format!("'{}", text)),
        _ => Cow::Borrowed(text),
    }
}
