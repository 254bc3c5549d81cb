// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含 CSV 批量导入、手动创建任务和批量操作等用例
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含导入校验规则、任务模型和后端网关接口
pub mod domain;

/// 基础设施模块
///
/// 提供 CSV 解析、下载服务后端客户端和指标导出
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由和处理器
pub mod presentation;

/// 工具模块
///
/// 提供通用的错误类型和遥测初始化
pub mod utils;
