//! # 取引先（Contractor）
//!
//! 返品クレームの相手方となる取引先。通知対象になるのは
//! 顧客区分（[`ContractorType::Customer`]）の取引先のみ。
//!
//! ## 不変条件
//!
//! - 通知対象の顧客は、リクエストの販売者が所有していること
//!   （[`Contractor::is_customer_of`]）
//! - 連絡先（メール、携帯番号）は空文字列を「未設定」として扱う

use serde::{Deserialize, Serialize};

use crate::seller::SellerId;

define_int_id! {
    /// 取引先 ID
    ///
    /// リクエストの `clientId` に対応する。
    pub struct ContractorId;
}

/// 取引先区分
///
/// 外部ストアでは整数コードで保持される（顧客 = 0）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractorType {
    /// 顧客
    Customer,
    /// 顧客以外の区分（仕入先など）
    Other(i64),
}

impl ContractorType {
    /// 顧客区分のコード値
    pub const CUSTOMER_CODE: i64 = 0;

    /// 整数コードから区分を作成する
    pub fn from_code(code: i64) -> Self {
        if code == Self::CUSTOMER_CODE {
            Self::Customer
        } else {
            Self::Other(code)
        }
    }

    /// 整数コードを返す
    pub fn code(&self) -> i64 {
        match self {
            Self::Customer => Self::CUSTOMER_CODE,
            Self::Other(code) => *code,
        }
    }
}

/// 取引先エンティティ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contractor {
    id:              ContractorId,
    contractor_type: ContractorType,
    seller_id:       SellerId,
    name:            String,
    full_name:       Option<String>,
    email:           Option<String>,
    mobile:          Option<String>,
}

impl Contractor {
    /// 連絡先を持たない取引先を作成する
    pub fn new(
        id: ContractorId,
        contractor_type: ContractorType,
        seller_id: SellerId,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            contractor_type,
            seller_id,
            name: name.into(),
            full_name: None,
            email: None,
            mobile: None,
        }
    }

    /// 氏名（姓名を結合した表示名）を設定した新しいインスタンスを返す
    pub fn with_full_name(self, full_name: impl Into<String>) -> Self {
        Self {
            full_name: Some(full_name.into()),
            ..self
        }
    }

    /// メールアドレスを設定した新しいインスタンスを返す
    pub fn with_email(self, email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..self
        }
    }

    /// 携帯電話番号を設定した新しいインスタンスを返す
    pub fn with_mobile(self, mobile: impl Into<String>) -> Self {
        Self {
            mobile: Some(mobile.into()),
            ..self
        }
    }

    pub fn id(&self) -> ContractorId {
        self.id
    }

    pub fn contractor_type(&self) -> ContractorType {
        self.contractor_type
    }

    /// 所有する販売者の ID
    pub fn seller_id(&self) -> SellerId {
        self.seller_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 指定した販売者の顧客であるか
    ///
    /// 顧客区分であり、かつ所有販売者が一致する場合のみ `true`。
    pub fn is_customer_of(&self, seller_id: SellerId) -> bool {
        self.contractor_type == ContractorType::Customer && self.seller_id == seller_id
    }

    /// 表示名を返す
    ///
    /// 氏名が空なら名称にフォールバックする。フォールバック後に空でも許容する
    /// （空かどうかはテンプレートデータの検証で判定する）。
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(full_name) if !full_name.is_empty() => full_name,
            _ => &self.name,
        }
    }

    /// メールアドレス（空文字列は未設定扱い）
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.is_empty())
    }

    /// 携帯電話番号（空文字列は未設定扱い）
    pub fn mobile(&self) -> Option<&str> {
        self.mobile.as_deref().filter(|mobile| !mobile.is_empty())
    }
}
