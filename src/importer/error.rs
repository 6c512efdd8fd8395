// ==========================================
// 采购订单库存差异报表 - 报表处理错误类型
// ==========================================
// 工具: thiserror 派生宏
// 职责: 解析 / 列校验 / 类型 / 导出 错误分类 + 稳定错误码
// ==========================================

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// 报表处理错误类型
#[derive(Error, Debug)]
pub enum ReportError {
    // ===== 文件相关错误 =====
    #[error("spreadsheet parse failed: {0}")]
    FileParse(String),

    #[error("unsupported file format: {0:?} (expected .xlsx/.xlsm/.xlsb/.xls/.ods/.csv)")]
    UnsupportedFormat(String),

    #[error("the uploaded sheet is empty or could not be read")]
    EmptySheet,

    // ===== 入口校验错误 =====
    #[error("missing required column(s): {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("row {row}, column {field:?}: expected a number, got {value:?}")]
    TypeMismatch {
        row: usize,
        field: String,
        value: String,
    },

    // ===== 导出错误 =====
    #[error("export serialization failed: {0}")]
    Serialization(String),

    // ===== 通用错误 =====
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// ==========================================
// 错误码（对外稳定，供客户端判断）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    ParseError,
    MissingColumn,
    TypeMismatch,
    SerializationError,
    InternalError,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::ParseError => "PARSE_ERROR",
            ErrorKind::MissingColumn => "MISSING_COLUMN",
            ErrorKind::TypeMismatch => "TYPE_MISMATCH",
            ErrorKind::SerializationError => "SERIALIZATION_ERROR",
            ErrorKind::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ReportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::FileParse(_)
            | ReportError::UnsupportedFormat(_)
            | ReportError::EmptySheet => ErrorKind::ParseError,
            ReportError::MissingColumns { .. } => ErrorKind::MissingColumn,
            ReportError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            ReportError::Serialization(_) => ErrorKind::SerializationError,
            ReportError::Io(_) => ErrorKind::InternalError,
        }
    }

    /// 对客户端展示的消息
    ///
    /// 第三方库的内部错误文本只写日志，不返回给调用方；
    /// 缺列与类型错误带行列信息，便于用户修正文件。
    pub fn public_message(&self) -> String {
        match self {
            ReportError::FileParse(_) => {
                "the uploaded file is not a readable spreadsheet".to_string()
            }
            ReportError::Io(_) => "internal error while handling the file".to_string(),
            ReportError::Serialization(_) => "failed to build the export file".to_string(),
            other => other.to_string(),
        }
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        ReportError::FileParse(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ReportError {
    fn from(err: calamine::Error) -> Self {
        ReportError::FileParse(err.to_string())
    }
}

// 实现 From<rust_xlsxwriter::XlsxError>
impl From<rust_xlsxwriter::XlsxError> for ReportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ReportError::Serialization(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Serialization(err.to_string())
    }
}

/// Result 类型别名
pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        assert_eq!(
            ReportError::EmptySheet.kind().code(),
            "PARSE_ERROR"
        );
        assert_eq!(
            ReportError::MissingColumns {
                columns: vec!["PO_NO".to_string()]
            }
            .kind()
            .code(),
            "MISSING_COLUMN"
        );
        assert_eq!(
            ReportError::TypeMismatch {
                row: 1,
                field: "BAL_TO_ISSUE".to_string(),
                value: "abc".to_string(),
            }
            .kind(),
            ErrorKind::TypeMismatch
        );
        assert_eq!(
            ReportError::Serialization("x".to_string()).kind().to_string(),
            "SERIALIZATION_ERROR"
        );
    }

    #[test]
    fn test_missing_columns_message_lists_all() {
        let err = ReportError::MissingColumns {
            columns: vec!["PCD Date".to_string(), "BAL_TO_ISSUE".to_string()],
        };
        assert_eq!(
            err.public_message(),
            "missing required column(s): PCD Date, BAL_TO_ISSUE"
        );
    }

    #[test]
    fn test_public_message_hides_library_detail() {
        let err = ReportError::FileParse("zip: invalid central directory".to_string());
        assert!(!err.public_message().contains("zip"));
        assert!(err.to_string().contains("zip"));
    }
}
