// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::dto::batch_request::{
    BatchItemError, BatchItemSuccess, BatchOperationRequestDto, BatchOperationResultDto,
};
use crate::domain::models::task::{DomainError, Task};
use crate::domain::repositories::task_gateway::{GatewayError, TaskGateway};

/// 批量操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchAction {
    Retry,
    Delete,
    Start,
}

impl fmt::Display for BatchAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BatchAction::Retry => write!(f, "retry"),
            BatchAction::Delete => write!(f, "delete"),
            BatchAction::Start => write!(f, "start"),
        }
    }
}

impl FromStr for BatchAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "retry" => Ok(BatchAction::Retry),
            "delete" => Ok(BatchAction::Delete),
            "start" => Ok(BatchAction::Start),
            other => Err(DomainError::ValidationError(format!(
                "无效的操作类型: {}，必须是: retry, delete, start",
                other
            ))),
        }
    }
}

pub struct BatchOperationUseCase<G> {
    gateway: Arc<G>,
}

impl<G: TaskGateway> BatchOperationUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// 对每个任务ID依次执行操作，单个失败不影响其余任务
    pub async fn execute(
        &self,
        request: BatchOperationRequestDto,
    ) -> Result<BatchOperationResultDto, DomainError> {
        if request.task_ids.is_empty() {
            return Err(DomainError::ValidationError("任务ID列表不能为空".to_string()));
        }
        let action = BatchAction::from_str(&request.action)?;

        let mut result = BatchOperationResultDto {
            total: request.task_ids.len(),
            ..BatchOperationResultDto::default()
        };

        for task_id in request.task_ids {
            match self.apply(action, &task_id).await {
                Ok(data) => result.successes.push(BatchItemSuccess { task_id, data }),
                Err(e) => {
                    warn!(%task_id, %action, error = %e, "Batch operation failed for task");
                    result.errors.push(BatchItemError {
                        task_id,
                        error: e.to_string(),
                    });
                }
            }
        }

        result.success_count = result.successes.len();
        result.error_count = result.errors.len();
        info!(
            %action,
            total = result.total,
            success = result.success_count,
            errors = result.error_count,
            "Batch operation finished"
        );
        Ok(result)
    }

    async fn apply(&self, action: BatchAction, task_id: &str) -> Result<Option<Task>, GatewayError> {
        match action {
            BatchAction::Retry => self.gateway.retry_task(task_id).await.map(Some),
            BatchAction::Delete => self.gateway.delete_task(task_id).await.map(|_| None),
            BatchAction::Start => self.gateway.start_task(task_id).await.map(Some),
        }
    }
}
