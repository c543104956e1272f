//! # 通知
//!
//! 返品クレーム通知に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 |
//! |---|------------|
//! | [`NotificationType`] | 通知種別（新規明細 / ステータス変更） |
//! | [`NotificationEvent`] | 送信基盤に渡すイベントタグ |
//! | [`NotificationPermission`] | 通知先従業員を決める権限カテゴリ |
//! | [`MessageKey`] | ローカライズ済み文言のキー |
//! | [`DispatchResult`] | チャネルごとの送信結果 |
//!
//! ## 設計方針
//!
//! - **ベストエフォート送信**: チャネル単位の送信失敗は操作全体のエラーにしない
//! - **結果の蓄積**: 送信結果は [`DispatchResult`] に記録して呼び出し元へ返す

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use thiserror::Error;

use crate::{
    DomainError,
    contractor::ContractorId,
    return_status::ReturnStatus,
    seller::SellerId,
    template::TemplateData,
};

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メッセージ送信に失敗
    #[error("メッセージ送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

/// 通知種別
///
/// リクエストの `notificationType` に対応する（NEW = 1, CHANGE = 2）。
/// それ以外の非 0 コードは [`Other`](NotificationType::Other) として受け付ける。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    /// 新規明細の追加
    New,
    /// ステータス変更
    Change,
    /// 未定義のコード（差分文言が生成されず、テンプレート検証で失敗する）
    Other(i64),
}

impl NotificationType {
    pub const NEW_CODE: i64 = 1;
    pub const CHANGE_CODE: i64 = 2;

    /// 整数コードから通知種別を作成する
    ///
    /// # エラー
    ///
    /// コードが 0（未指定）の場合は `DomainError::Validation` を返す。
    pub fn from_code(code: i64) -> Result<Self, DomainError> {
        match code {
            0 => Err(DomainError::Validation("Empty notificationType".to_string())),
            Self::NEW_CODE => Ok(Self::New),
            Self::CHANGE_CODE => Ok(Self::Change),
            other => Ok(Self::Other(other)),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::New => Self::NEW_CODE,
            Self::Change => Self::CHANGE_CODE,
            Self::Other(code) => *code,
        }
    }
}

/// 通知イベントタグ
///
/// 送信基盤（メール・SMS）に渡され、配信設定やログの分類に使われる。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum NotificationEvent {
    /// 返品ステータス変更（新規明細の通知も含む）
    ChangeReturnStatus,
}

/// 通知先従業員を決める権限カテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, strum::Display)]
pub enum NotificationPermission {
    /// 返品（goods return）通知の受信権限
    #[strum(serialize = "tsGoodsReturn")]
    GoodsReturn,
}

/// ローカライズ済み文言のキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, strum::Display)]
pub enum MessageKey {
    /// 「新しい明細が追加されました」
    #[strum(serialize = "NewPositionAdded")]
    NewPositionAdded,
    /// 「ステータスが FROM から TO に変更されました」
    #[strum(serialize = "PositionStatusHasChanged")]
    PositionStatusHasChanged,
    #[strum(serialize = "complaintEmployeeEmailSubject")]
    ComplaintEmployeeEmailSubject,
    #[strum(serialize = "complaintEmployeeEmailBody")]
    ComplaintEmployeeEmailBody,
    #[strum(serialize = "complaintClientEmailSubject")]
    ComplaintClientEmailSubject,
    #[strum(serialize = "complaintClientEmailBody")]
    ComplaintClientEmailBody,
}

impl MessageKey {
    pub const ALL: [MessageKey; 6] = [
        Self::NewPositionAdded,
        Self::PositionStatusHasChanged,
        Self::ComplaintEmployeeEmailSubject,
        Self::ComplaintEmployeeEmailBody,
        Self::ComplaintClientEmailSubject,
        Self::ComplaintClientEmailBody,
    ];

    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// メールメッセージ
///
/// ローカライズ済みの件名・本文を持つ。NotificationSender に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信元メールアドレス（販売者ごとの設定値）
    pub from:    String,
    /// 送信先メールアドレス
    pub to:      String,
    /// 件名
    pub subject: String,
    /// 本文
    pub body:    String,
}

/// メッセージ送信時の付帯情報
///
/// 顧客宛ての送信では、顧客 ID と遷移先ステータスを併せて渡す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageContext {
    pub reseller_id: SellerId,
    pub event:       NotificationEvent,
    pub client_id:   Option<ContractorId>,
    pub status:      Option<ReturnStatus>,
}

impl MessageContext {
    /// 従業員宛て（顧客情報なし）の付帯情報
    pub fn for_employees(reseller_id: SellerId, event: NotificationEvent) -> Self {
        Self {
            reseller_id,
            event,
            client_id: None,
            status: None,
        }
    }

    /// 顧客宛ての付帯情報
    pub fn for_client(
        reseller_id: SellerId,
        event: NotificationEvent,
        client_id: ContractorId,
        status: ReturnStatus,
    ) -> Self {
        Self {
            reseller_id,
            event,
            client_id: Some(client_id),
            status: Some(status),
        }
    }
}

/// SMS 通知リクエスト
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsRequest {
    pub reseller_id:   SellerId,
    pub client_id:     ContractorId,
    pub event:         NotificationEvent,
    pub status:        ReturnStatus,
    pub template_data: TemplateData,
}

/// SMS 通知の送信結果
///
/// 送信基盤は成功時にも診断メッセージを返すことがある。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SmsOutcome {
    pub sent:       bool,
    pub diagnostic: Option<String>,
}

/// 顧客 SMS チャネルの結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsDeliveryResult {
    pub is_sent: bool,
    /// 最後に得られた診断メッセージ（なければ空文字列）
    pub message: String,
}

/// 通知操作の結果
///
/// すべて false / 空で作成され、各チャネルの送信処理で更新される。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    pub notification_employee_by_email: bool,
    pub notification_client_by_email:   bool,
    pub notification_client_by_sms:     SmsDeliveryResult,
}

impl DispatchResult {
    /// 処理を行わずに終了したことを表す結果を作成する
    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            notification_client_by_sms: SmsDeliveryResult {
                is_sent: false,
                message: message.into(),
            },
            ..Self::default()
        }
    }
}
