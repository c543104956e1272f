//! # 販売者設定
//!
//! 販売者ごとの通知設定を取得するインターフェース。
//!
//! - [`ResellerSettings`]: 送信元メールアドレス
//! - [`PermissionDirectory`]: 権限カテゴリに基づく通知先従業員のメールアドレス
//!
//! 設定値を固定で保持する実装（[`StaticResellerSettings`] /
//! [`StaticPermissionDirectory`]）は、外部の設定ストアを持たない環境や
//! 設定ファイルからの構築に使う。

use std::collections::HashMap;

use async_trait::async_trait;
use returnflow_domain::{notification::NotificationPermission, seller::SellerId};

use crate::error::InfraError;

/// 販売者設定トレイト
#[async_trait]
pub trait ResellerSettings: Send + Sync {
    /// 販売者の送信元メールアドレスを返す
    ///
    /// 未設定の場合は `Ok(None)`。空文字列も未設定として扱うこと。
    async fn from_email_address(&self, reseller_id: SellerId)
    -> Result<Option<String>, InfraError>;
}

/// 通知先従業員の権限ディレクトリ
#[async_trait]
pub trait PermissionDirectory: Send + Sync {
    /// 指定の権限カテゴリで通知を受け取る従業員のメールアドレスを返す
    ///
    /// 順序はストアの返却順をそのまま保つ。
    async fn permitted_emails(
        &self,
        reseller_id: SellerId,
        permission: NotificationPermission,
    ) -> Result<Vec<String>, InfraError>;
}

/// 固定値による販売者設定
///
/// 販売者ごとの上書きがなければ、デフォルトの送信元アドレスを返す。
#[derive(Debug, Clone, Default)]
pub struct StaticResellerSettings {
    default_from_address: Option<String>,
    overrides:            HashMap<SellerId, String>,
}

impl StaticResellerSettings {
    pub fn new(default_from_address: Option<String>) -> Self {
        Self {
            default_from_address,
            overrides: HashMap::new(),
        }
    }

    /// 販売者固有の送信元アドレスを設定する
    pub fn with_reseller(mut self, reseller_id: SellerId, from_address: impl Into<String>) -> Self {
        self.overrides.insert(reseller_id, from_address.into());
        self
    }
}

#[async_trait]
impl ResellerSettings for StaticResellerSettings {
    async fn from_email_address(
        &self,
        reseller_id: SellerId,
    ) -> Result<Option<String>, InfraError> {
        Ok(self
            .overrides
            .get(&reseller_id)
            .or(self.default_from_address.as_ref())
            .filter(|address| !address.is_empty())
            .cloned())
    }
}

/// 固定値による権限ディレクトリ
#[derive(Debug, Clone, Default)]
pub struct StaticPermissionDirectory {
    emails: HashMap<(SellerId, NotificationPermission), Vec<String>>,
}

impl StaticPermissionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 販売者・権限カテゴリに通知先を追加する
    pub fn with_emails(
        mut self,
        reseller_id: SellerId,
        permission: NotificationPermission,
        emails: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.emails
            .entry((reseller_id, permission))
            .or_default()
            .extend(emails.into_iter().map(Into::into));
        self
    }
}

#[async_trait]
impl PermissionDirectory for StaticPermissionDirectory {
    async fn permitted_emails(
        &self,
        reseller_id: SellerId,
        permission: NotificationPermission,
    ) -> Result<Vec<String>, InfraError> {
        Ok(self
            .emails
            .get(&(reseller_id, permission))
            .cloned()
            .unwrap_or_default())
    }
}
