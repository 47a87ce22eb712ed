// ==========================================
// 工单排程看板 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换引擎/仓储错误为调用方可见的拒绝原因
// 说明: 所有错误均可恢复，用户修正输入后重新提交即可
// ==========================================

use crate::engine::error::EngineError;
use crate::repository::error::RepositoryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 校验错误
    // ==========================================
    #[error("日期格式错误（应为YYYY-MM-DD）: {0}")]
    InvalidDateFormat(String),

    #[error("工单名称不能为空")]
    EmptyName,

    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 排程冲突
    // ==========================================
    #[error("{message}")]
    OverlapConflict {
        message: String,
        conflicting_id: String,
    },

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("持久化错误: {0}")]
    PersistenceError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 稳定错误代码（供前端区分处理）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidDateFormat(_) => "INVALID_DATE_FORMAT",
            ApiError::EmptyName => "EMPTY_NAME",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::OverlapConflict { .. } => "OVERLAP_CONFLICT",
            ApiError::PersistenceError(_) => "PERSISTENCE_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// 转换为错误响应
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
            details: match self {
                ApiError::OverlapConflict { conflicting_id, .. } => {
                    Some(serde_json::json!({ "conflicting_id": conflicting_id }))
                }
                _ => None,
            },
        }
    }
}

// ==========================================
// 从 EngineError 转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidDateFormat { input } => ApiError::InvalidDateFormat(input),
            EngineError::InvalidPointer { x, pixels_per_day } => ApiError::InvalidInput(format!(
                "点击位置无效: x={}, pixels_per_day={}",
                x, pixels_per_day
            )),
            EngineError::EmptyName => ApiError::EmptyName,
            EngineError::OverlapConflict {
                message,
                conflicting_id,
            } => ApiError::OverlapConflict {
                message,
                conflicting_id,
            },
            EngineError::WorkOrderNotFound { id } => {
                ApiError::NotFound(format!("工单(id={})不存在", id))
            }
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        ApiError::PersistenceError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

/// 错误响应（返回给前端）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 错误消息
    pub message: String,

    /// 详细信息（可选）
    pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::OVERLAP_CONFLICT_MESSAGE;
    use crate::repository::error::PersistenceReadError;

    #[test]
    fn test_engine_error_conversion() {
        let api_err: ApiError = EngineError::OverlapConflict {
            message: OVERLAP_CONFLICT_MESSAGE.to_string(),
            conflicting_id: "wo-1".to_string(),
        }
        .into();
        assert_eq!(api_err.code(), "OVERLAP_CONFLICT");
        assert_eq!(api_err.to_string(), OVERLAP_CONFLICT_MESSAGE);

        let response = api_err.to_response();
        assert_eq!(response.details.unwrap()["conflicting_id"], "wo-1");

        let api_err: ApiError = EngineError::WorkOrderNotFound { id: "wo-9".to_string() }.into();
        match api_err {
            ApiError::NotFound(msg) => assert!(msg.contains("wo-9")),
            _ => panic!("Expected NotFound"),
        }

        let api_err: ApiError = EngineError::EmptyName.into();
        assert_eq!(api_err.code(), "EMPTY_NAME");
    }

    #[test]
    fn test_repository_error_conversion() {
        let api_err: ApiError = RepositoryError::from(PersistenceReadError::NotAnArray).into();
        assert_eq!(api_err.code(), "PERSISTENCE_ERROR");
        assert!(api_err.to_response().details.is_none());
    }
}
