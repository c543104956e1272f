//! Noop SMS 送信実装

use async_trait::async_trait;
use returnflow_domain::notification::{NotificationError, SmsOutcome, SmsRequest};

use super::SmsNotifier;

/// Noop SMS 送信（ログ出力のみ、常に未送信を返す）
#[derive(Debug, Clone)]
pub struct NoopSmsNotifier;

#[async_trait]
impl SmsNotifier for NoopSmsNotifier {
    async fn send(&self, request: &SmsRequest) -> Result<SmsOutcome, NotificationError> {
        tracing::info!(
            reseller_id = %request.reseller_id,
            client_id = %request.client_id,
            status = %request.status,
            "Noop: SMS 送信をスキップ"
        );
        Ok(SmsOutcome::default())
    }
}

#[cfg(test)]
mod tests {
    use returnflow_domain::{
        contractor::ContractorId,
        notification::NotificationEvent,
        return_status::ReturnStatus,
        seller::SellerId,
        template::TemplateData,
    };

    use super::*;

    #[tokio::test]
    async fn 常に未送信を返す() {
        let request = SmsRequest {
            reseller_id:   SellerId::new(1),
            client_id:     ContractorId::new(2),
            event:         NotificationEvent::ChangeReturnStatus,
            status:        ReturnStatus::REJECTED,
            template_data: TemplateData::new(),
        };

        let outcome = NoopSmsNotifier.send(&request).await.unwrap();

        assert!(!outcome.sent);
        assert!(outcome.diagnostic.is_none());
    }
}
