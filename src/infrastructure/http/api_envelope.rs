// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::repositories::task_gateway::GatewayError;

/// 表示成功的业务码
pub const SUCCESS_CODES: [i64; 3] = [200, 201, 204];

/// 后端统一响应信封
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiEnvelope<T> {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T: DeserializeOwned> ApiEnvelope<T> {
    /// 从响应体解码信封
    pub fn decode(body: &[u8]) -> Result<Self, GatewayError> {
        serde_json::from_slice(body).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    pub fn is_success(&self) -> bool {
        SUCCESS_CODES.contains(&self.code)
    }

    /// 业务码成功时取出 `data`，否则转换为 `GatewayError::Api`
    pub fn into_result(self) -> Result<Option<T>, GatewayError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(GatewayError::Api {
                code: self.code,
                message: self
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| "请求失败".to_string()),
            })
        }
    }
}
