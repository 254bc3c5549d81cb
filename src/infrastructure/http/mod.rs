// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 下载服务后端的 HTTP 访问层
///
/// - api_envelope: 统一响应信封 `{code, message, data}` 的解码
/// - download_api_client: `TaskGateway` 的 reqwest 实现
/// - in_flight: 在途请求计数
pub mod api_envelope;
pub mod download_api_client;
pub mod in_flight;

pub use api_envelope::ApiEnvelope;
pub use download_api_client::DownloadApiClient;
pub use in_flight::{InFlightGuard, InFlightTracker};
