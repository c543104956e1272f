//! # ContractorRepository
//!
//! 取引先（顧客を含む）のルックアップ。
//!
//! 区分や所有販売者による絞り込みは行わない。顧客であることの検証は
//! ユースケース層の責務（`Contractor::is_customer_of`）。

use async_trait::async_trait;
use returnflow_domain::contractor::{Contractor, ContractorId};

use crate::error::InfraError;

/// 取引先リポジトリトレイト
#[async_trait]
pub trait ContractorRepository: Send + Sync {
    /// ID で取引先を検索
    async fn find_by_id(&self, id: ContractorId) -> Result<Option<Contractor>, InfraError>;
}
