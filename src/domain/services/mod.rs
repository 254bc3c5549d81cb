// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含导入流程的核心业务规则，全部为无状态的纯函数或只持有配置的结构体：
/// - CSV 注入清理（csv_sanitizer）：中和表格公式前缀
/// - 导入校验（import_validator）：文件预检、表头契约与逐行校验
/// - URL 安全（url_safety）：协议、SSRF 与扩展名检查
/// - 视频ID（video_id）：直播间ID补零、格式校验与视频ID生成
pub mod csv_sanitizer;
pub mod import_validator;
pub mod url_safety;
pub mod video_id;
