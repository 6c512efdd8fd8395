// ==========================================
// 采购订单库存差异报表 - API层错误类型
// ==========================================
// 职责: 请求级错误 + 报表错误 → HTTP 状态码与 {"error", "code"} 响应体
// 约定: 客户端只看到 public 消息，细节写入日志
// ==========================================

use crate::importer::error::ReportError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求格式错误（400）
    // ==========================================
    #[error("No file part")]
    NoFilePart,

    #[error("No selected file")]
    NoSelectedFile,

    #[error("invalid multipart request: {0}")]
    InvalidMultipart(String),

    // ==========================================
    // 报表处理错误（500）
    // ==========================================
    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// 稳定错误码
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NoFilePart => "NO_FILE_PART",
            ApiError::NoSelectedFile => "NO_SELECTED_FILE",
            ApiError::InvalidMultipart(_) => "INVALID_MULTIPART",
            ApiError::Report(err) => err.kind().code(),
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoFilePart | ApiError::NoSelectedFile | ApiError::InvalidMultipart(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Report(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回给客户端的消息
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Report(err) => err.public_message(),
            ApiError::Internal(_) => "internal server error".to_string(),
            ApiError::InvalidMultipart(_) => "malformed multipart request".to_string(),
            other => other.to_string(),
        }
    }
}

// 后台任务 panic / 取消
impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<axum::extract::multipart::MultipartError> for ApiError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        ApiError::InvalidMultipart(err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = ?self, "请求处理失败");
        } else {
            tracing::warn!(code = self.code(), error = %self, "请求被拒绝");
        }

        let body = json!({
            "error": self.public_message(),
            "code": self.code(),
        });
        (status, Json(body)).into_response()
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
