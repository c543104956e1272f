//! SES 通知送信実装
//!
//! AWS SES v2 API を使用してメールを送信する。
//! 本番環境で使用する。

use async_trait::async_trait;
use aws_sdk_sesv2::{
    Client,
    types::{Body, Content, Destination, EmailContent, Message, MessageTag},
};
use returnflow_domain::notification::{EmailMessage, MessageContext, NotificationError};

use super::NotificationSender;

/// SES 通知送信
///
/// `aws_sdk_sesv2::Client` をラップする。
/// 送信元アドレスは販売者ごとに異なるため、SES で検証済みのドメインであること。
pub struct SesNotificationSender {
    client: Client,
}

impl SesNotificationSender {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// 環境（AWS 標準の認証情報チェーン）からクライアントを構築する
    pub async fn from_env() -> Self {
        let config = aws_config::load_from_env().await;
        Self::new(Client::new(&config))
    }
}

/// 付帯情報を SES のメッセージタグに変換する
fn build_tags(context: &MessageContext) -> Result<Vec<MessageTag>, NotificationError> {
    let mut pairs = vec![
        ("event", context.event.to_string()),
        ("reseller_id", context.reseller_id.to_string()),
    ];
    if let Some(client_id) = context.client_id {
        pairs.push(("client_id", client_id.to_string()));
    }
    if let Some(status) = context.status {
        pairs.push(("status", status.to_string()));
    }

    pairs
        .into_iter()
        .map(|(name, value)| {
            MessageTag::builder()
                .name(name)
                .value(value)
                .build()
                .map_err(|e| NotificationError::SendFailed(format!("メッセージタグ構築失敗: {e}")))
        })
        .collect()
}

#[async_trait]
impl NotificationSender for SesNotificationSender {
    #[tracing::instrument(skip_all, level = "debug", fields(reseller_id = %context.reseller_id, event = %context.event))]
    async fn send_email(
        &self,
        email: &EmailMessage,
        context: &MessageContext,
    ) -> Result<(), NotificationError> {
        let destination = Destination::builder().to_addresses(&email.to).build();

        let content = EmailContent::builder()
            .simple(
                Message::builder()
                    .subject(
                        Content::builder()
                            .data(&email.subject)
                            .build()
                            .map_err(|e| {
                                NotificationError::SendFailed(format!("件名構築失敗: {e}"))
                            })?,
                    )
                    .body(
                        Body::builder()
                            .text(Content::builder().data(&email.body).build().map_err(
                                |e| NotificationError::SendFailed(format!("本文構築失敗: {e}")),
                            )?)
                            .build(),
                    )
                    .build(),
            )
            .build();

        self.client
            .send_email()
            .from_email_address(&email.from)
            .destination(destination)
            .content(content)
            .set_email_tags(Some(build_tags(context)?))
            .send()
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SES 送信失敗: {e}")))?;

        Ok(())
    }
}
