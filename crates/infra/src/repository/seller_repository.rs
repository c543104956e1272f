//! # SellerRepository
//!
//! 販売者のルックアップ。

use async_trait::async_trait;
use returnflow_domain::seller::{Seller, SellerId};

use crate::error::InfraError;

/// 販売者リポジトリトレイト
#[async_trait]
pub trait SellerRepository: Send + Sync {
    /// ID で販売者を検索
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(seller))`: 販売者が見つかった場合
    /// - `Ok(None)`: 販売者が見つからない場合
    /// - `Err(_)`: ストアとの通信エラー
    async fn find_by_id(&self, id: SellerId) -> Result<Option<Seller>, InfraError>;
}
