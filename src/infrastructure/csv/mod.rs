// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// CSV 读取模块
///
/// 将上传的原始字节解码并解析为表头与数据行
pub mod csv_reader;
