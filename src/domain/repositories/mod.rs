// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 网关接口模块
///
/// 定义领域层依赖的下载服务后端接口，具体实现由基础设施层提供，
/// 测试中可以替换为模拟实现。
pub mod task_gateway;
