//! # SMS 通知
//!
//! 顧客への SMS 通知を外部の SMS ゲートウェイへ委譲するモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `SmsNotifier` trait で SMS 送信を抽象化
//! - **2 つの実装**: HTTP ゲートウェイ（本番用）、Noop（無効化用）
//! - **診断メッセージの保持**: ゲートウェイが返す診断メッセージは
//!   成功時にも [`SmsOutcome::diagnostic`] として呼び出し元へ返す

mod http;
mod noop;

use async_trait::async_trait;
pub use http::HttpSmsNotifier;
pub use noop::NoopSmsNotifier;
use returnflow_domain::notification::{NotificationError, SmsOutcome, SmsRequest};

/// SMS 送信トレイト
#[async_trait]
pub trait SmsNotifier: Send + Sync {
    /// SMS を 1 件送信する
    ///
    /// ゲートウェイが受理したが送信しなかった場合は
    /// `Ok(SmsOutcome { sent: false, .. })` を返す。
    async fn send(&self, request: &SmsRequest) -> Result<SmsOutcome, NotificationError>;
}
