//! # メール送信
//!
//! 返品通知メールの送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **3 つの実装**: SMTP（Mailpit 開発用）、SES（本番用）、Noop（無効化用）
//! - **環境変数切替**: `NOTIFICATION_BACKEND` でランタイム選択（core-service の bootstrap）
//! - **送信元は販売者単位**: 送信元アドレスは [`EmailMessage::from`] で渡す

mod noop;
mod ses;
mod smtp;

use async_trait::async_trait;
pub use noop::NoopNotificationSender;
use returnflow_domain::notification::{EmailMessage, MessageContext, NotificationError};
pub use ses::SesNotificationSender;
pub use smtp::SmtpNotificationSender;

/// メール送信トレイト
///
/// `context` には販売者 ID、イベントタグ、顧客宛ての場合は顧客 ID と
/// 遷移先ステータスが入る。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを 1 通送信する
    async fn send_email(
        &self,
        email: &EmailMessage,
        context: &MessageContext,
    ) -> Result<(), NotificationError>;
}
