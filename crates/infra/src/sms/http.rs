//! HTTP SMS ゲートウェイ実装
//!
//! [`SmsRequest`] を JSON で POST し、ゲートウェイの応答
//! `{"sent": bool, "error": string | null}` を [`SmsOutcome`] に変換する。

use std::time::Duration;

use async_trait::async_trait;
use returnflow_domain::notification::{NotificationError, SmsOutcome, SmsRequest};
use serde::Deserialize;
use url::Url;

use super::SmsNotifier;

/// ゲートウェイの応答ボディ
#[derive(Debug, Deserialize)]
struct GatewayResponse {
    #[serde(default)]
    sent:  bool,
    #[serde(default)]
    error: Option<String>,
}

impl From<GatewayResponse> for SmsOutcome {
    fn from(response: GatewayResponse) -> Self {
        Self {
            sent:       response.sent,
            diagnostic: response.error.filter(|e| !e.is_empty()),
        }
    }
}

/// HTTP SMS ゲートウェイクライアント
pub struct HttpSmsNotifier {
    client:   reqwest::Client,
    endpoint: Url,
}

impl HttpSmsNotifier {
    /// 新しいクライアントを作成
    ///
    /// # エラー
    ///
    /// HTTP クライアントの初期化に失敗した場合は `NotificationError::SendFailed`。
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, NotificationError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotificationError::SendFailed(format!("HTTP クライアント初期化失敗: {e}")))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SmsNotifier for HttpSmsNotifier {
    #[tracing::instrument(skip_all, level = "debug", fields(reseller_id = %request.reseller_id, client_id = %request.client_id))]
    async fn send(&self, request: &SmsRequest) -> Result<SmsOutcome, NotificationError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SMS ゲートウェイ接続失敗: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotificationError::SendFailed(format!(
                "SMS ゲートウェイがエラーを返しました: {status}"
            )));
        }

        let body: GatewayResponse = response
            .json()
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SMS ゲートウェイ応答の解析失敗: {e}")))?;

        Ok(body.into())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(r#"{"sent": true}"#, true, None)]
    #[case(r#"{"sent": true, "error": ""}"#, true, None)]
    #[case(r#"{"sent": false, "error": "number blocked"}"#, false, Some("number blocked"))]
    #[case(r#"{"sent": true, "error": "queued with delay"}"#, true, Some("queued with delay"))]
    #[case(r#"{}"#, false, None)]
    fn ゲートウェイ応答をsms_outcomeに変換する(
        #[case] body: &str,
        #[case] sent: bool,
        #[case] diagnostic: Option<&str>,
    ) {
        let response: GatewayResponse = serde_json::from_str(body).unwrap();

        let outcome = SmsOutcome::from(response);

        assert_eq!(
            outcome,
            SmsOutcome {
                sent,
                diagnostic: diagnostic.map(str::to_string),
            }
        );
    }

    #[test]
    fn エンドポイントを保持する() {
        let endpoint = Url::parse("http://localhost:9000/sms").unwrap();

        let notifier = HttpSmsNotifier::new(endpoint.clone(), Duration::from_secs(5)).unwrap();

        assert_eq!(notifier.endpoint(), &endpoint);
    }
}
