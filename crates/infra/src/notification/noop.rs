//! Noop 通知送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! 通知無効化時に使用する。

use async_trait::async_trait;
use returnflow_domain::notification::{EmailMessage, MessageContext, NotificationError};

use super::NotificationSender;

/// Noop 通知送信（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send_email(
        &self,
        email: &EmailMessage,
        context: &MessageContext,
    ) -> Result<(), NotificationError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            reseller_id = %context.reseller_id,
            event = %context.event,
            "Noop: メール送信をスキップ"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use returnflow_domain::{notification::NotificationEvent, seller::SellerId};

    use super::*;

    #[tokio::test]
    async fn send_emailがエラーを返さない() {
        let sender = NoopNotificationSender;
        let email = EmailMessage {
            from:    "shop@example.com".to_string(),
            to:      "test@example.com".to_string(),
            subject: "テスト件名".to_string(),
            body:    "テスト".to_string(),
        };
        let context =
            MessageContext::for_employees(SellerId::new(1), NotificationEvent::ChangeReturnStatus);

        let result = sender.send_email(&email, &context).await;
        assert!(result.is_ok());
    }
}
