// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    body::Bytes,
    extract::{Extension, Query},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    application::usecases::import_tasks::{ImportTasksUseCase, ImportUpload},
    domain::{repositories::task_gateway::TaskGateway, services::import_validator::ImportRules},
    presentation::errors::AppError,
};

/// 上传参数
#[derive(Debug, Default, Deserialize)]
pub struct ImportParams {
    /// 原始文件名，用于扩展名检查
    #[serde(default)]
    pub filename: String,
}

fn to_upload(params: ImportParams, headers: &HeaderMap, body: Bytes) -> ImportUpload {
    let mime_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    ImportUpload::new(params.filename, mime_type, body)
}

/// 预览导入：只做校验，不提交任务
pub async fn preview_import<G>(
    Extension(gateway): Extension<Arc<G>>,
    Extension(rules): Extension<ImportRules>,
    Query(params): Query<ImportParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError>
where
    G: TaskGateway + 'static,
{
    let use_case = ImportTasksUseCase::new(gateway, rules);
    let preview = use_case.preview(&to_upload(params, &headers, body))?;
    Ok((StatusCode::OK, Json(preview.to_dto())))
}

/// 执行导入：校验后逐条提交
pub async fn execute_import<G>(
    Extension(gateway): Extension<Arc<G>>,
    Extension(rules): Extension<ImportRules>,
    Query(params): Query<ImportParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError>
where
    G: TaskGateway + 'static,
{
    let use_case = ImportTasksUseCase::new(gateway, rules);
    let result = use_case.execute(&to_upload(params, &headers, body)).await?;
    let status = if result.is_fully_rejected() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    Ok((status, Json(result)))
}
