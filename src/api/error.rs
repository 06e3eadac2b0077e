// ==========================================
// 交接班设备点检系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，把领域/仓储/导出错误转换为面向操作员的消息
// 所有错误均不致命：失败后应用保持可用、状态不变
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::error::ReportError;
use crate::exporter::error::ExportError;
use crate::repository::error::RepositoryError;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 导出错误
    // ==========================================
    #[error("导出失败: {0}")]
    ExportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 稳定错误代码（供 --json 输出与脚本判断）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::DatabaseConnectionError(_) => "DATABASE_CONNECTION_ERROR",
            ApiError::ExportError(_) => "EXPORT_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
        }
    }
}

/// 错误响应（--json 模式输出）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

// ==========================================
// 从 ReportError 转换
// ==========================================
impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::MissingOperator => ApiError::ValidationError(err.to_string()),
            ReportError::GroupNotFound { .. } | ReportError::EquipmentNotFound { .. } => {
                ApiError::NotFound(err.to_string())
            }
            ReportError::ImmutableTag { .. } | ReportError::InvalidTemplate(_) => {
                ApiError::InvalidInput(err.to_string())
            }
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::SerializationError(msg) => {
                ApiError::InternalError(format!("序列化失败: {}", msg))
            }
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_error_mapping() {
        let err: ApiError = ReportError::MissingOperator.into();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        let err: ApiError = ReportError::EquipmentNotFound {
            group: "Pumps".to_string(),
            equipment_id: "x".to_string(),
        }
        .into();
        assert_eq!(err.code(), "NOT_FOUND");
        assert!(err.to_string().contains("Pumps"));
    }

    #[test]
    fn test_repository_error_mapping() {
        let err: ApiError = RepositoryError::LockError("poisoned".to_string()).into();
        assert_eq!(err.code(), "DATABASE_CONNECTION_ERROR");

        let response = err.to_response();
        assert_eq!(response.code, "DATABASE_CONNECTION_ERROR");
        assert!(response.message.contains("poisoned"));
    }
}
