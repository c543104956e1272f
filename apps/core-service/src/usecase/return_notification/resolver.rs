//! # エンティティ解決
//!
//! 販売者・顧客・起票者・査定者を ID ストアから解決し、関連の不変条件を検証する。
//!
//! 見つからない場合の文言は `"{Entity} not found!"`。顧客については
//! 不在・顧客区分でない・所有販売者が異なる、のいずれも同じ文言にまとめる。

use std::sync::Arc;

use returnflow_domain::{
    DomainError,
    contractor::Contractor,
    employee::{Employee, EmployeeId},
    seller::Seller,
};
use returnflow_infra::repository::{ContractorRepository, EmployeeRepository, SellerRepository};

use super::input::ValidatedRequest;
use crate::error::ReturnOperationError;

/// 解決済みのエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntities {
    pub seller:      Seller,
    pub client:      Contractor,
    /// 顧客の表示名（氏名、なければ名称。空の場合もある）
    pub client_name: String,
    pub creator:     Employee,
    pub expert:      Employee,
}

fn not_found(entity_type: &'static str, id: impl ToString) -> ReturnOperationError {
    DomainError::NotFound {
        entity_type,
        id: id.to_string(),
    }
    .into()
}

/// ID ストアからエンティティを解決する
pub struct EntityResolver {
    seller_repo:     Arc<dyn SellerRepository>,
    contractor_repo: Arc<dyn ContractorRepository>,
    employee_repo:   Arc<dyn EmployeeRepository>,
}

impl EntityResolver {
    pub fn new(
        seller_repo: Arc<dyn SellerRepository>,
        contractor_repo: Arc<dyn ContractorRepository>,
        employee_repo: Arc<dyn EmployeeRepository>,
    ) -> Self {
        Self {
            seller_repo,
            contractor_repo,
            employee_repo,
        }
    }

    /// 販売者 → 顧客 → 起票者 → 査定者の順に解決する
    ///
    /// 最初に見つからなかったエンティティで失敗する。
    #[tracing::instrument(skip_all, level = "debug", fields(reseller_id = %request.reseller_id, client_id = %request.client_id))]
    pub async fn resolve(
        &self,
        request: &ValidatedRequest,
    ) -> Result<ResolvedEntities, ReturnOperationError> {
        let seller = self
            .seller_repo
            .find_by_id(request.reseller_id)
            .await?
            .ok_or_else(|| not_found("Seller", request.reseller_id))?;

        let client = self
            .contractor_repo
            .find_by_id(request.client_id)
            .await?
            .filter(|client| client.is_customer_of(request.reseller_id))
            .ok_or_else(|| not_found("Client", request.client_id))?;
        let client_name = client.display_name().to_string();

        let creator = self.find_employee(request.creator_id, "Creator").await?;
        let expert = self.find_employee(request.expert_id, "Expert").await?;

        Ok(ResolvedEntities {
            seller,
            client,
            client_name,
            creator,
            expert,
        })
    }

    async fn find_employee(
        &self,
        id: EmployeeId,
        role: &'static str,
    ) -> Result<Employee, ReturnOperationError> {
        self.employee_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(role, id))
    }
}
