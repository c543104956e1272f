//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## 設計方針
//!
//! - **型による分類**: エラーの種類を列挙型で明示し、パターンマッチで処理可能に
//! - **thiserror 活用**: `#[error(...)]` マクロでエラーメッセージを自動生成
//! - **メッセージの保持**: ユースケース層はバリアント内の文字列をそのまま利用者に返す
//!
//! ## 使用例
//!
//! ```rust
//! use returnflow_domain::DomainError;
//!
//! fn validate_code(code: i64) -> Result<(), DomainError> {
//!     if code == 0 {
//!         return Err(DomainError::Validation("Empty code".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_code(0).is_err());
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// ビジネスロジックの実行中に発生する例外状態を表現する。
/// ユースケース層でこのエラーを受け取り、操作エラーに変換する。
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値がビジネスルールに違反している場合に使用する。
    /// メッセージは利用者向けの文言（例: `"Empty notificationType"`）。
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// エンティティが見つからない
    ///
    /// `entity_type` にはエンティティの種類（"Seller", "Contractor" など）を指定する。
    #[error("{entity_type} が見つかりません: {id}")]
    NotFound {
        /// エンティティの種類
        entity_type: &'static str,
        /// 検索に使用した識別子
        id:          String,
    },
}

impl DomainError {
    /// 利用者向けのメッセージ本体を返す
    ///
    /// `Display` はエラー種別の接頭辞を含むため、外部に返す文言には
    /// こちらを使用する。
    pub fn message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::NotFound { entity_type, .. } => format!("{entity_type} not found!"),
        }
    }
}
