//! # 返品通知ユースケース
//!
//! 返品クレームの変更を従業員と顧客に通知する。
//!
//! ## 処理の流れ
//!
//! ```text
//! 入力検証 → エンティティ解決 → テンプレートデータ構築 → チャネル送信
//! ```
//!
//! データは前段から後段へ一方向に流れる。入力検証・エンティティ解決・
//! テンプレートデータ構築での失敗は操作全体のエラーとなり、いずれの
//! チャネルにも送信しない。チャネル送信の失敗は結果にのみ反映される。
//!
//! ## モジュール構成
//!
//! - [`input`] - リクエストの正規化と必須項目の検証
//! - [`resolver`] - 販売者・顧客・起票者・査定者の解決
//! - [`template_builder`] - 差分文言とテンプレートデータの構築
//! - [`dispatcher`] - 従業員メール・顧客メール・顧客 SMS の送信
//! - [`localizer`] - 販売者ごとのロケールによる文言生成

pub mod dispatcher;
pub mod input;
pub mod localizer;
pub mod resolver;
pub mod template_builder;

use std::sync::Arc;

pub use dispatcher::ChannelDispatcher;
pub use input::{InputOutcome, ReturnOperationRequest, ValidatedRequest};
pub use localizer::{Locale, Localizer, TeraLocalizer};
pub use resolver::{EntityResolver, ResolvedEntities};
use returnflow_domain::notification::DispatchResult;
use returnflow_infra::{
    notification::NotificationSender,
    repository::{ContractorRepository, EmployeeRepository, SellerRepository},
    settings::{PermissionDirectory, ResellerSettings},
    sms::SmsNotifier,
    status_catalog::StatusCatalog,
};
use returnflow_shared::{event_log::event, log_business_event};
pub use template_builder::TemplateBuilder;

use crate::error::ReturnOperationError;

/// ユースケースが依存するコラボレータ
pub struct ReturnNotificationDeps {
    pub seller_repo:       Arc<dyn SellerRepository>,
    pub contractor_repo:   Arc<dyn ContractorRepository>,
    pub employee_repo:     Arc<dyn EmployeeRepository>,
    pub status_catalog:    Arc<dyn StatusCatalog>,
    pub localizer:         Arc<dyn Localizer>,
    pub reseller_settings: Arc<dyn ResellerSettings>,
    pub permissions:       Arc<dyn PermissionDirectory>,
    pub sender:            Arc<dyn NotificationSender>,
    pub sms_notifier:      Arc<dyn SmsNotifier>,
}

/// 返品通知ユースケース
///
/// 呼び出し間で状態を共有しないため、1 つのインスタンスを
/// 並行するリクエストで使い回せる。
pub struct ReturnNotificationUseCase {
    resolver:         EntityResolver,
    template_builder: TemplateBuilder,
    dispatcher:       ChannelDispatcher,
}

impl ReturnNotificationUseCase {
    pub fn new(deps: ReturnNotificationDeps) -> Self {
        Self {
            resolver:         EntityResolver::new(
                deps.seller_repo,
                deps.contractor_repo,
                deps.employee_repo,
            ),
            template_builder: TemplateBuilder::new(deps.localizer.clone(), deps.status_catalog),
            dispatcher:       ChannelDispatcher::new(
                deps.sender,
                deps.sms_notifier,
                deps.localizer,
                deps.reseller_settings,
                deps.permissions,
            ),
        }
    }

    /// 返品通知操作を実行する
    ///
    /// # 戻り値
    ///
    /// - `Ok(result)`: 各チャネルの送信結果（`resellerId` が空の場合は診断メッセージのみ）
    /// - `Err(_)`: 入力・エンティティ・テンプレートデータの不備、または ID ストアの障害
    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(reseller_id = request.reseller_id, notification_type = request.notification_type)
    )]
    pub async fn do_operation(
        &self,
        request: &ReturnOperationRequest,
    ) -> Result<DispatchResult, ReturnOperationError> {
        let result = self.execute(request).await;

        if let Err(e) = &result {
            log_business_event!(
                event.category = event::category::RETURN_OPERATION,
                event.action = event::action::OPERATION_REJECTED,
                event.reseller_id = request.reseller_id,
                event.result = event::result::FAILURE,
                error = %e,
                "返品通知操作を中断"
            );
        }

        result
    }

    async fn execute(
        &self,
        request: &ReturnOperationRequest,
    ) -> Result<DispatchResult, ReturnOperationError> {
        let validated = match input::validate(request)? {
            InputOutcome::Proceed(validated) => validated,
            InputOutcome::ShortCircuit(result) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SKIPPED,
                    event.result = event::result::SUCCESS,
                    reason = %result.notification_client_by_sms.message,
                    "販売者が指定されていないため通知をスキップ"
                );
                return Ok(result);
            }
        };

        let entities = self.resolver.resolve(&validated).await?;
        let template_data = self.template_builder.build(&validated, &entities).await?;

        Ok(self
            .dispatcher
            .dispatch(&validated, &entities.client, &template_data)
            .await)
    }
}
