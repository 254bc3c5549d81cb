// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 导入（import）：CSV 行、导入候选任务、拒绝记录与校验结果
/// - 任务（task）：后端下载任务、失败记录与已下载视频的镜像
pub mod import;
pub mod task;
