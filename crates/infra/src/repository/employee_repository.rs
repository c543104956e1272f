//! # EmployeeRepository
//!
//! 従業員のルックアップ。クレームの起票者・査定者の解決に使う。

use async_trait::async_trait;
use returnflow_domain::employee::{Employee, EmployeeId};

use crate::error::InfraError;

/// 従業員リポジトリトレイト
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// ID で従業員を検索
    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, InfraError>;
}
