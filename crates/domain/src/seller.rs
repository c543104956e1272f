//! # 販売者（Seller / Reseller）
//!
//! 返品を処理する主体となる事業者。通知のローカライズ、送信元アドレス、
//! 通知先従業員の権限設定はすべて販売者単位で決まる。

use serde::{Deserialize, Serialize};

define_int_id! {
    /// 販売者 ID
    ///
    /// リクエストの `resellerId` に対応する。
    pub struct SellerId;
}

/// 販売者エンティティ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    id:   SellerId,
    name: String,
}

impl Seller {
    pub fn new(id: SellerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> SellerId {
        self.id
    }

    /// 表示用の氏名（事業者名）を返す
    pub fn full_name(&self) -> &str {
        &self.name
    }
}
