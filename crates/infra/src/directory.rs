//! # JSON ディレクトリ
//!
//! 販売者・取引先・従業員のレコードを JSON ドキュメントから読み込み、
//! 3 つのリポジトリトレイトをまとめて実装するインメモリのストア。
//!
//! 外部の ID ストアを持たない環境（ローカル実行、動作確認）で使う。
//! 販売者レコードには送信元アドレス、返品通知の受信者、文言のロケールも記述でき、
//! [`StaticPermissionDirectory`] と [`StaticResellerSettings`] の構築や
//! ローカライザーの販売者ごとの設定に使われる。
//!
//! ```json
//! {
//!   "sellers":     [{ "id": 7, "name": "Shop", "fromAddress": "shop@example.com",
//!                    "goodsReturnEmails": ["staff@example.com"], "locale": "en" }],
//!   "contractors": [{ "id": 42, "type": 0, "sellerId": 7, "name": "Ivanov",
//!                    "fullName": "Ivan Ivanov", "email": "ivan@example.com",
//!                    "mobile": "+79990000000" }],
//!   "employees":   [{ "id": 3, "fullName": "Petr Petrov" }]
//! }
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use returnflow_domain::{
    contractor::{Contractor, ContractorId, ContractorType},
    employee::{Employee, EmployeeId},
    notification::NotificationPermission,
    seller::{Seller, SellerId},
};
use serde::Deserialize;

use crate::{
    error::InfraError,
    repository::{ContractorRepository, EmployeeRepository, SellerRepository},
    settings::{StaticPermissionDirectory, StaticResellerSettings},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SellerRecord {
    id:                  i64,
    name:                String,
    from_address:        Option<String>,
    #[serde(default)]
    goods_return_emails: Vec<String>,
    locale:              Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContractorRecord {
    id:              i64,
    #[serde(rename = "type", default)]
    contractor_type: i64,
    seller_id:       i64,
    #[serde(default)]
    name:            String,
    full_name:       Option<String>,
    email:           Option<String>,
    mobile:          Option<String>,
}

impl From<ContractorRecord> for Contractor {
    fn from(record: ContractorRecord) -> Self {
        let contractor = Contractor::new(
            ContractorId::new(record.id),
            ContractorType::from_code(record.contractor_type),
            SellerId::new(record.seller_id),
            record.name,
        );
        let contractor = match record.full_name {
            Some(full_name) => contractor.with_full_name(full_name),
            None => contractor,
        };
        let contractor = match record.email {
            Some(email) => contractor.with_email(email),
            None => contractor,
        };
        match record.mobile {
            Some(mobile) => contractor.with_mobile(mobile),
            None => contractor,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmployeeRecord {
    id:        i64,
    full_name: String,
}

#[derive(Debug, Default, Deserialize)]
struct DirectoryDocument {
    #[serde(default)]
    sellers:     Vec<SellerRecord>,
    #[serde(default)]
    contractors: Vec<ContractorRecord>,
    #[serde(default)]
    employees:   Vec<EmployeeRecord>,
}

/// JSON ドキュメントから構築したインメモリのディレクトリ
#[derive(Debug, Clone, Default)]
pub struct JsonDirectory {
    sellers:             HashMap<SellerId, Seller>,
    contractors:         HashMap<ContractorId, Contractor>,
    employees:           HashMap<EmployeeId, Employee>,
    from_addresses:      HashMap<SellerId, String>,
    goods_return_emails: HashMap<SellerId, Vec<String>>,
    locales:             HashMap<SellerId, String>,
}

impl JsonDirectory {
    /// JSON 文字列からディレクトリを構築する
    ///
    /// # エラー
    ///
    /// JSON の構文やレコードの形が不正な場合は `InfraError::unexpected`。
    pub fn from_json(json: &str) -> Result<Self, InfraError> {
        let document: DirectoryDocument = serde_json::from_str(json)
            .map_err(|e| InfraError::unexpected(format!("ディレクトリの読み込みに失敗: {e}")))?;

        let mut directory = Self::default();
        for record in document.sellers {
            let id = SellerId::new(record.id);
            if let Some(from_address) = record.from_address {
                directory.from_addresses.insert(id, from_address);
            }
            if let Some(locale) = record.locale {
                directory.locales.insert(id, locale);
            }
            directory
                .goods_return_emails
                .insert(id, record.goods_return_emails);
            directory.sellers.insert(id, Seller::new(id, record.name));
        }

        Ok(Self {
            contractors: document
                .contractors
                .into_iter()
                .map(|r| {
                    let contractor = Contractor::from(r);
                    (contractor.id(), contractor)
                })
                .collect(),
            employees:   document
                .employees
                .into_iter()
                .map(|r| {
                    let id = EmployeeId::new(r.id);
                    (id, Employee::new(id, r.full_name))
                })
                .collect(),
            ..directory
        })
    }

    /// 販売者レコードの送信元アドレスを上書きとして持つ販売者設定を作成する
    pub fn reseller_settings(&self, default_from_address: Option<String>) -> StaticResellerSettings {
        self.from_addresses.iter().fold(
            StaticResellerSettings::new(default_from_address),
            |settings, (id, address)| settings.with_reseller(*id, address.clone()),
        )
    }

    /// 販売者ごとに指定されたロケール名（`"ru"`、`"en"` など）
    ///
    /// 値の検証は呼び出し側で行う。
    pub fn reseller_locales(&self) -> impl Iterator<Item = (SellerId, &str)> {
        self.locales
            .iter()
            .map(|(id, locale)| (*id, locale.as_str()))
    }

    /// 販売者レコードの返品通知受信者を持つ権限ディレクトリを作成する
    pub fn permission_directory(&self) -> StaticPermissionDirectory {
        self.goods_return_emails.iter().fold(
            StaticPermissionDirectory::new(),
            |directory, (id, emails)| {
                directory.with_emails(*id, NotificationPermission::GoodsReturn, emails.clone())
            },
        )
    }
}

#[async_trait]
impl SellerRepository for JsonDirectory {
    async fn find_by_id(&self, id: SellerId) -> Result<Option<Seller>, InfraError> {
        Ok(self.sellers.get(&id).cloned())
    }
}

#[async_trait]
impl ContractorRepository for JsonDirectory {
    async fn find_by_id(&self, id: ContractorId) -> Result<Option<Contractor>, InfraError> {
        Ok(self.contractors.get(&id).cloned())
    }
}

#[async_trait]
impl EmployeeRepository for JsonDirectory {
    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, InfraError> {
        Ok(self.employees.get(&id).cloned())
    }
}
