//! # テンプレートデータ構築
//!
//! 差分文言（DIFFERENCES）を生成し、メッセージテンプレートに渡す
//! [`TemplateData`] を組み立てる。
//!
//! ## 差分文言
//!
//! | 通知種別 | 文言 |
//! |---------|------|
//! | NEW | `NewPositionAdded`（変数なし） |
//! | CHANGE + `differences` あり | `PositionStatusHasChanged`（`FROM` / `TO` はステータス名） |
//! | それ以外 | 空文字列 |
//!
//! 差分文言の生成に失敗した場合も空文字列になり、検証で DIFFERENCES が空として失敗する。

use std::sync::Arc;

use returnflow_domain::{
    notification::{MessageKey, NotificationType},
    return_status::{ReturnStatus, StatusDifferences},
    template::{TemplateData, TemplateField, TemplateVars},
};
use returnflow_infra::status_catalog::StatusCatalog;
use returnflow_shared::event_log::error;

use super::{input::ValidatedRequest, localizer::Localizer, resolver::ResolvedEntities};
use crate::error::ReturnOperationError;

/// テンプレートデータのビルダー
///
/// 内部状態を持たないため、同じ入力と同じコラボレータの応答からは
/// 同じ [`TemplateData`] が得られる。
pub struct TemplateBuilder {
    localizer:      Arc<dyn Localizer>,
    status_catalog: Arc<dyn StatusCatalog>,
}

impl TemplateBuilder {
    pub fn new(localizer: Arc<dyn Localizer>, status_catalog: Arc<dyn StatusCatalog>) -> Self {
        Self {
            localizer,
            status_catalog,
        }
    }

    /// テンプレートデータを構築し、空のフィールドがないことを検証する
    pub async fn build(
        &self,
        request: &ValidatedRequest,
        entities: &ResolvedEntities,
    ) -> Result<TemplateData, ReturnOperationError> {
        let differences = self.differences(request).await;
        let data = assemble(request, entities, differences);

        match data.first_empty_field() {
            Some(field) => Err(ReturnOperationError::TemplateData { field }),
            None => Ok(data),
        }
    }

    /// 差分文言を生成する
    pub async fn differences(&self, request: &ValidatedRequest) -> String {
        let rendered = match (request.notification_type, request.differences) {
            (NotificationType::New, _) => self.localizer.render(
                MessageKey::NewPositionAdded,
                &TemplateVars::new(),
                request.reseller_id,
            ),
            (NotificationType::Change, Some(differences)) => {
                match self.status_change_vars(differences).await {
                    Some(vars) => self.localizer.render(
                        MessageKey::PositionStatusHasChanged,
                        &vars,
                        request.reseller_id,
                    ),
                    None => return String::new(),
                }
            }
            _ => return String::new(),
        };

        rendered.unwrap_or_else(|e| {
            tracing::warn!(
                error.category = error::category::INFRASTRUCTURE,
                error.kind = error::kind::TEMPLATE,
                reseller_id = %request.reseller_id,
                "差分文言の生成に失敗: {}",
                e
            );
            String::new()
        })
    }

    async fn status_change_vars(&self, differences: StatusDifferences) -> Option<TemplateVars> {
        let from = self.status_name(differences.from).await?;
        let to = self.status_name(differences.to).await?;

        Some(TemplateVars::new().with("FROM", from).with("TO", to))
    }

    async fn status_name(&self, status: ReturnStatus) -> Option<String> {
        self.status_catalog
            .status_name(status)
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = error::kind::LOOKUP,
                    status = %status,
                    "ステータス名の取得に失敗: {}",
                    e
                );
            })
            .ok()
    }
}

/// リクエストと解決済みエンティティからテンプレートデータを組み立てる
pub fn assemble(
    request: &ValidatedRequest,
    entities: &ResolvedEntities,
    differences: String,
) -> TemplateData {
    TemplateData::new()
        .with(TemplateField::ComplaintId, request.complaint_id)
        .with(TemplateField::ComplaintNumber, request.complaint_number.as_str())
        .with(TemplateField::CreatorId, request.creator_id.as_i64())
        .with(TemplateField::CreatorName, entities.creator.full_name())
        .with(TemplateField::ExpertId, request.expert_id.as_i64())
        .with(TemplateField::ExpertName, entities.expert.full_name())
        .with(TemplateField::ClientId, request.client_id.as_i64())
        .with(TemplateField::ClientName, entities.client_name.as_str())
        .with(TemplateField::ConsumptionId, request.consumption_id)
        .with(TemplateField::ConsumptionNumber, request.consumption_number.as_str())
        .with(TemplateField::AgreementNumber, request.agreement_number.as_str())
        .with(TemplateField::Date, request.date.as_str())
        .with(TemplateField::Differences, differences)
}
