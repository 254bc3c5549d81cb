// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::domain::models::task::DomainError;
use crate::domain::repositories::task_gateway::GatewayError;
use crate::utils::errors::{ImportError, TaskCommandError};

/// 应用错误类型
///
/// 封装所有可能的应用层错误，提供统一的错误处理接口
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        if self.0.downcast_ref::<ImportError>().is_some()
            || self.0.downcast_ref::<DomainError>().is_some()
        {
            return StatusCode::BAD_REQUEST;
        }
        if let Some(e) = self.0.downcast_ref::<GatewayError>() {
            return gateway_status(e);
        }
        match self.0.downcast_ref::<TaskCommandError>() {
            Some(TaskCommandError::Domain(_)) => StatusCode::BAD_REQUEST,
            Some(TaskCommandError::Gateway(e)) => gateway_status(e),
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn gateway_status(e: &GatewayError) -> StatusCode {
    match e {
        GatewayError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        GatewayError::Http { status: 404, .. } => StatusCode::NOT_FOUND,
        GatewayError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = self.0.to_string();
        if status.is_server_error() {
            error!(%status, "Request failed: {}", error_message);
        }

        let body = Json(json!({ "success": false, "error": error_message }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
