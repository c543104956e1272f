//! # Core Service エラー定義
//!
//! 返品通知操作のエラーと、エラーレスポンスへの変換を定義する。
//!
//! | バリアント | 種別 | ステータス |
//! |-----------|------|-----------|
//! | `Validation` | BadRequest | 400 |
//! | `NotFound` | BadRequest | 400 |
//! | `TemplateData` | InternalError | 500 |
//! | `Infra` | InternalError | 500 |
//!
//! チャネル単位の送信失敗はこのエラーにならない（`DispatchResult` に反映される）。

use http::StatusCode;
use returnflow_domain::{DomainError, template::TemplateField};
use returnflow_infra::InfraError;
use returnflow_shared::{ErrorResponse, event_log::error};
use thiserror::Error;

/// 返品通知操作で発生するエラー
#[derive(Debug, Error)]
pub enum ReturnOperationError {
    /// 必須項目の欠落・不正
    #[error("{0}")]
    Validation(String),

    /// エンティティが見つからない（関連の不整合を含む）
    #[error("{0}")]
    NotFound(String),

    /// テンプレートデータに空のフィールドがある
    #[error("Template Data ({field}) is empty!")]
    TemplateData { field: TemplateField },

    /// 外部コラボレータの呼び出しに失敗
    #[error("外部コラボレータの呼び出しに失敗: {0}")]
    Infra(#[from] InfraError),
}

/// エラー種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    InternalError,
}

impl ReturnOperationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::NotFound(_) => ErrorKind::BadRequest,
            Self::TemplateData { .. } | Self::Infra(_) => ErrorKind::InternalError,
        }
    }

    /// 呼び出し元に推奨する HTTP ステータスコード
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// RFC 9457 形式のエラーレスポンスに変換する
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            Self::Validation(msg) => ErrorResponse::validation_error(msg),
            Self::NotFound(msg) => ErrorResponse::not_found(msg),
            Self::TemplateData { .. } => ErrorResponse::new(
                "template-data-empty",
                "Template Data Empty",
                StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                self.to_string(),
            ),
            Self::Infra(e) => {
                tracing::error!(
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = error::kind::LOOKUP,
                    span_trace = %e.span_trace(),
                    "外部コラボレータエラー: {}",
                    e
                );
                ErrorResponse::internal_error()
            }
        }
    }
}

impl From<DomainError> for ReturnOperationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
            DomainError::NotFound { .. } => Self::NotFound(err.message()),
        }
    }
}
