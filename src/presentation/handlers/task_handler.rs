// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::{
    application::{
        dto::{batch_request::BatchOperationRequestDto, create_task_request::CreateTaskRequestDto},
        usecases::{batch_operation::BatchOperationUseCase, create_task::CreateTaskUseCase},
    },
    domain::repositories::task_gateway::TaskGateway,
    presentation::errors::AppError,
};

/// 手动创建单个下载任务
pub async fn create_task<G>(
    Extension(gateway): Extension<Arc<G>>,
    Json(payload): Json<CreateTaskRequestDto>,
) -> Result<impl IntoResponse, AppError>
where
    G: TaskGateway + 'static,
{
    let task = CreateTaskUseCase::new(gateway).execute(payload).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// 批量重试/删除/开始任务
pub async fn batch_operate<G>(
    Extension(gateway): Extension<Arc<G>>,
    Json(payload): Json<BatchOperationRequestDto>,
) -> Result<impl IntoResponse, AppError>
where
    G: TaskGateway + 'static,
{
    let result = BatchOperationUseCase::new(gateway).execute(payload).await?;
    Ok((StatusCode::OK, Json(result)))
}
