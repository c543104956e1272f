//! # チャネル送信
//!
//! 従業員メール・顧客メール・顧客 SMS の 3 チャネルに通知を送信し、
//! 結果を [`DispatchResult`] に蓄積する。
//!
//! ## 設計方針
//!
//! - **ベストエフォート**: チャネルの送信失敗はエラーとして返さず、ログと結果フラグにのみ反映する
//! - **チャネルの独立性**: あるチャネルの失敗は他のチャネルの送信を妨げない
//! - **逐次送信**: 従業員メールは権限ディレクトリの返却順に 1 通ずつ送信する
//!
//! ## 顧客チャネルの条件
//!
//! ステータス変更通知で、かつ遷移先ステータスが指定されている場合のみ送信する。

use std::sync::Arc;

use returnflow_domain::{
    contractor::Contractor,
    notification::{
        DispatchResult,
        EmailMessage,
        MessageContext,
        MessageKey,
        NotificationEvent,
        NotificationPermission,
        SmsDeliveryResult,
        SmsRequest,
    },
    return_status::ReturnStatus,
    seller::SellerId,
    template::TemplateData,
};
use returnflow_infra::{
    notification::NotificationSender,
    settings::{PermissionDirectory, ResellerSettings},
    sms::SmsNotifier,
};
use returnflow_shared::{
    event_log::{error, event},
    log_business_event,
};

use super::{input::ValidatedRequest, localizer::Localizer};

/// 送信に使うイベントタグ
const EVENT: NotificationEvent = NotificationEvent::ChangeReturnStatus;

/// 件名と本文
struct RenderedMessage {
    subject: String,
    body:    String,
}

/// チャネル送信
pub struct ChannelDispatcher {
    sender:            Arc<dyn NotificationSender>,
    sms_notifier:      Arc<dyn SmsNotifier>,
    localizer:         Arc<dyn Localizer>,
    reseller_settings: Arc<dyn ResellerSettings>,
    permissions:       Arc<dyn PermissionDirectory>,
}

impl ChannelDispatcher {
    pub fn new(
        sender: Arc<dyn NotificationSender>,
        sms_notifier: Arc<dyn SmsNotifier>,
        localizer: Arc<dyn Localizer>,
        reseller_settings: Arc<dyn ResellerSettings>,
        permissions: Arc<dyn PermissionDirectory>,
    ) -> Self {
        Self {
            sender,
            sms_notifier,
            localizer,
            reseller_settings,
            permissions,
        }
    }

    /// 全チャネルに送信し、結果を返す
    pub async fn dispatch(
        &self,
        request: &ValidatedRequest,
        client: &Contractor,
        data: &TemplateData,
    ) -> DispatchResult {
        let reseller_id = request.reseller_id;
        let mut result = DispatchResult::default();

        let from_address = self.from_address(reseller_id).await;
        let employee_emails = self.employee_emails(reseller_id).await;

        if let Some(from) = from_address.as_deref() {
            result.notification_employee_by_email = self
                .notify_employees(reseller_id, from, &employee_emails, data)
                .await;
        }

        let Some(status) = request.client_target_status() else {
            return result;
        };

        if let (Some(from), Some(to)) = (from_address.as_deref(), client.email()) {
            result.notification_client_by_email = self
                .notify_client_by_email(reseller_id, client, status, from, to, data)
                .await;
        }

        if client.mobile().is_some() {
            result.notification_client_by_sms = self
                .notify_client_by_sms(reseller_id, client, status, data)
                .await;
        }

        result
    }

    async fn from_address(&self, reseller_id: SellerId) -> Option<String> {
        self.reseller_settings
            .from_email_address(reseller_id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = error::kind::LOOKUP,
                    reseller_id = %reseller_id,
                    "送信元アドレスの取得に失敗: {}",
                    e
                );
                None
            })
    }

    async fn employee_emails(&self, reseller_id: SellerId) -> Vec<String> {
        self.permissions
            .permitted_emails(reseller_id, NotificationPermission::GoodsReturn)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = error::kind::LOOKUP,
                    reseller_id = %reseller_id,
                    "通知先従業員の取得に失敗: {}",
                    e
                );
                Vec::new()
            })
    }

    fn render(
        &self,
        subject_key: MessageKey,
        body_key: MessageKey,
        reseller_id: SellerId,
        data: &TemplateData,
    ) -> Option<RenderedMessage> {
        let vars = data.to_vars();
        let rendered = self
            .localizer
            .render(subject_key, &vars, reseller_id)
            .and_then(|subject| {
                self.localizer
                    .render(body_key, &vars, reseller_id)
                    .map(|body| RenderedMessage { subject, body })
            });

        rendered
            .inspect_err(|e| {
                tracing::error!(
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = error::kind::TEMPLATE,
                    reseller_id = %reseller_id,
                    message_key = %subject_key,
                    "通知文言のレンダリングに失敗: {}",
                    e
                );
            })
            .ok()
    }

    /// 従業員メールを送信する
    ///
    /// 1 通でも送信を試みた場合は `true`（送信の成否は問わない）。
    async fn notify_employees(
        &self,
        reseller_id: SellerId,
        from: &str,
        recipients: &[String],
        data: &TemplateData,
    ) -> bool {
        if recipients.is_empty() {
            return false;
        }
        let Some(message) = self.render(
            MessageKey::ComplaintEmployeeEmailSubject,
            MessageKey::ComplaintEmployeeEmailBody,
            reseller_id,
            data,
        ) else {
            return false;
        };

        let context = MessageContext::for_employees(reseller_id, EVENT);
        for to in recipients {
            let email = EmailMessage {
                from:    from.to_string(),
                to:      to.clone(),
                subject: message.subject.clone(),
                body:    message.body.clone(),
            };
            match self.sender.send_email(&email, &context).await {
                Ok(()) => log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.reseller_id = %reseller_id,
                    event.channel = event::channel::EMPLOYEE_EMAIL,
                    event.result = event::result::SUCCESS,
                    notification.recipient = %to,
                    "従業員への通知メール送信成功"
                ),
                Err(e) => log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.reseller_id = %reseller_id,
                    event.channel = event::channel::EMPLOYEE_EMAIL,
                    event.result = event::result::FAILURE,
                    notification.recipient = %to,
                    error.category = error::category::EXTERNAL_SERVICE,
                    error.kind = error::kind::EMAIL_TRANSPORT,
                    error = %e,
                    "従業員への通知メール送信失敗"
                ),
            }
        }

        true
    }

    /// 顧客メールを送信する（送信成功で `true`）
    async fn notify_client_by_email(
        &self,
        reseller_id: SellerId,
        client: &Contractor,
        status: ReturnStatus,
        from: &str,
        to: &str,
        data: &TemplateData,
    ) -> bool {
        let Some(message) = self.render(
            MessageKey::ComplaintClientEmailSubject,
            MessageKey::ComplaintClientEmailBody,
            reseller_id,
            data,
        ) else {
            return false;
        };

        let email = EmailMessage {
            from:    from.to_string(),
            to:      to.to_string(),
            subject: message.subject,
            body:    message.body,
        };
        let context = MessageContext::for_client(reseller_id, EVENT, client.id(), status);

        match self.sender.send_email(&email, &context).await {
            Ok(()) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.reseller_id = %reseller_id,
                    event.channel = event::channel::CLIENT_EMAIL,
                    event.entity_id = %client.id(),
                    event.result = event::result::SUCCESS,
                    "顧客への通知メール送信成功"
                );
                true
            }
            Err(e) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.reseller_id = %reseller_id,
                    event.channel = event::channel::CLIENT_EMAIL,
                    event.entity_id = %client.id(),
                    event.result = event::result::FAILURE,
                    error.category = error::category::EXTERNAL_SERVICE,
                    error.kind = error::kind::EMAIL_TRANSPORT,
                    error = %e,
                    "顧客への通知メール送信失敗"
                );
                false
            }
        }
    }

    /// 顧客 SMS を送信する
    ///
    /// 送信基盤が診断メッセージを返した場合は、送信の成否にかかわらず
    /// `message` に記録する。
    async fn notify_client_by_sms(
        &self,
        reseller_id: SellerId,
        client: &Contractor,
        status: ReturnStatus,
        data: &TemplateData,
    ) -> SmsDeliveryResult {
        let request = SmsRequest {
            reseller_id,
            client_id: client.id(),
            event: EVENT,
            status,
            template_data: data.clone(),
        };

        match self.sms_notifier.send(&request).await {
            Ok(outcome) => {
                let event_result = if outcome.sent {
                    event::result::SUCCESS
                } else {
                    event::result::FAILURE
                };
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.reseller_id = %reseller_id,
                    event.channel = event::channel::CLIENT_SMS,
                    event.entity_id = %client.id(),
                    event.result = event_result,
                    notification.diagnostic = outcome.diagnostic.as_deref().unwrap_or_default(),
                    "顧客への SMS 送信要求完了"
                );
                SmsDeliveryResult {
                    is_sent: outcome.sent,
                    message: outcome.diagnostic.unwrap_or_default(),
                }
            }
            Err(e) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.reseller_id = %reseller_id,
                    event.channel = event::channel::CLIENT_SMS,
                    event.entity_id = %client.id(),
                    event.result = event::result::FAILURE,
                    error.category = error::category::EXTERNAL_SERVICE,
                    error.kind = error::kind::SMS_TRANSPORT,
                    error = %e,
                    "顧客への SMS 送信失敗"
                );
                SmsDeliveryResult {
                    is_sent: false,
                    message: e.to_string(),
                }
            }
        }
    }
}
