// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与外部系统的交互。
///
/// 包含的子模块：
/// - CSV（csv）：上传文件的解码与解析
/// - HTTP（http）：下载服务后端的客户端实现
/// - 指标（metrics）：导入过程的计数指标与 Prometheus 导出
///
/// 基础设施层依赖于领域层的抽象接口（如 `TaskGateway`），
/// 领域层不感知具体的技术实现。
pub mod csv;
pub mod http;
pub mod metrics;
