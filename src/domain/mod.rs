// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：导入记录与下载任务等数据结构
/// - 网关接口（repositories）：下载服务后端的抽象接口
/// - 服务（services）：导入校验与清理规则
///
/// 领域层不依赖任何外部实现。
pub mod models;
pub mod repositories;
pub mod services;
