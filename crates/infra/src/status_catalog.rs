//! # ステータスカタログ
//!
//! 返品ステータスコードを人が読める名称に変換する。
//! ステータス変更通知の差分文言（FROM / TO）に使われる。

use std::collections::HashMap;

use async_trait::async_trait;
use returnflow_domain::return_status::ReturnStatus;

use crate::error::InfraError;

/// ステータス名称の解決トレイト
#[async_trait]
pub trait StatusCatalog: Send + Sync {
    /// ステータスコードの名称を返す
    ///
    /// 未定義のコードはエラーとする。
    async fn status_name(&self, status: ReturnStatus) -> Result<String, InfraError>;
}

/// 固定表によるステータスカタログ
///
/// デフォルトでは組み込みの 3 ステータス（Completed / Pending / Rejected）を持つ。
#[derive(Debug, Clone)]
pub struct StaticStatusCatalog {
    names: HashMap<ReturnStatus, String>,
}

impl StaticStatusCatalog {
    /// 名称表を指定して作成する
    pub fn new(names: impl IntoIterator<Item = (ReturnStatus, String)>) -> Self {
        Self {
            names: names.into_iter().collect(),
        }
    }
}

impl Default for StaticStatusCatalog {
    fn default() -> Self {
        Self::new([
            (ReturnStatus::COMPLETED, "Completed".to_string()),
            (ReturnStatus::PENDING, "Pending".to_string()),
            (ReturnStatus::REJECTED, "Rejected".to_string()),
        ])
    }
}

#[async_trait]
impl StatusCatalog for StaticStatusCatalog {
    async fn status_name(&self, status: ReturnStatus) -> Result<String, InfraError> {
        self.names
            .get(&status)
            .cloned()
            .ok_or_else(|| InfraError::unexpected(format!("未定義のステータスコード: {status}")))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, "Completed")]
    #[case(1, "Pending")]
    #[case(2, "Rejected")]
    #[tokio::test]
    async fn 組み込みステータスの名称を返す(#[case] code: i64, #[case] expected: &str) {
        let catalog = StaticStatusCatalog::default();

        let name = catalog.status_name(ReturnStatus::new(code)).await.unwrap();

        assert_eq!(name, expected);
    }

    #[tokio::test]
    async fn 未定義のコードはエラーを返す() {
        let catalog = StaticStatusCatalog::default();

        let result = catalog.status_name(ReturnStatus::new(99)).await;

        assert!(result.is_err());
    }
}
