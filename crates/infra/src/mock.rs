//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリのモックコラボレータ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! returnflow-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use returnflow_domain::{
    contractor::{Contractor, ContractorId},
    employee::{Employee, EmployeeId},
    notification::{EmailMessage, MessageContext, NotificationError, SmsOutcome, SmsRequest},
    return_status::ReturnStatus,
    seller::{Seller, SellerId},
};

use crate::{
    error::InfraError,
    notification::NotificationSender,
    repository::{ContractorRepository, EmployeeRepository, SellerRepository},
    sms::SmsNotifier,
    status_catalog::StatusCatalog,
};

// ===== MockSellerRepository =====

#[derive(Clone, Default)]
pub struct MockSellerRepository {
    sellers:     Arc<Mutex<Vec<Seller>>>,
    unavailable: Arc<Mutex<bool>>,
}

impl MockSellerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_seller(&self, seller: Seller) {
        self.sellers.lock().unwrap().push(seller);
    }

    /// 以降のルックアップを `InfraError::unavailable` で失敗させる
    pub fn set_unavailable(&self) {
        *self.unavailable.lock().unwrap() = true;
    }
}

#[async_trait]
impl SellerRepository for MockSellerRepository {
    async fn find_by_id(&self, id: SellerId) -> Result<Option<Seller>, InfraError> {
        if *self.unavailable.lock().unwrap() {
            return Err(InfraError::unavailable("seller store is unavailable"));
        }
        Ok(self
            .sellers
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id() == id)
            .cloned())
    }
}

// ===== MockContractorRepository =====

#[derive(Clone, Default)]
pub struct MockContractorRepository {
    contractors: Arc<Mutex<Vec<Contractor>>>,
}

impl MockContractorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_contractor(&self, contractor: Contractor) {
        self.contractors.lock().unwrap().push(contractor);
    }
}

#[async_trait]
impl ContractorRepository for MockContractorRepository {
    async fn find_by_id(&self, id: ContractorId) -> Result<Option<Contractor>, InfraError> {
        Ok(self
            .contractors
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id() == id)
            .cloned())
    }
}

// ===== MockEmployeeRepository =====

#[derive(Clone, Default)]
pub struct MockEmployeeRepository {
    employees: Arc<Mutex<Vec<Employee>>>,
}

impl MockEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_employee(&self, employee: Employee) {
        self.employees.lock().unwrap().push(employee);
    }
}

#[async_trait]
impl EmployeeRepository for MockEmployeeRepository {
    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, InfraError> {
        Ok(self
            .employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id() == id)
            .cloned())
    }
}

// ===== MockStatusCatalog =====

/// 常に失敗するステータスカタログ
#[derive(Clone, Default)]
pub struct FailingStatusCatalog;

#[async_trait]
impl StatusCatalog for FailingStatusCatalog {
    async fn status_name(&self, status: ReturnStatus) -> Result<String, InfraError> {
        Err(InfraError::unavailable(format!(
            "status catalog is unavailable (code {status})"
        )))
    }
}

// ===== MockNotificationSender =====

/// 送信したメールを記録するモック
///
/// `fail_for` で指定した宛先への送信は `SendFailed` を返す（記録はしない）。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent_emails:     Arc<Mutex<Vec<(EmailMessage, MessageContext)>>>,
    failing_targets: Arc<Mutex<HashSet<String>>>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定した宛先への送信を失敗させる
    pub fn fail_for(&self, to: impl Into<String>) {
        self.failing_targets.lock().unwrap().insert(to.into());
    }

    /// 送信済みメールの一覧を取得
    pub fn sent_emails(&self) -> Vec<(EmailMessage, MessageContext)> {
        self.sent_emails.lock().unwrap().clone()
    }

    /// 送信済みメールの宛先一覧を取得
    pub fn recipients(&self) -> Vec<String> {
        self.sent_emails
            .lock()
            .unwrap()
            .iter()
            .map(|(email, _)| email.to.clone())
            .collect()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(
        &self,
        email: &EmailMessage,
        context: &MessageContext,
    ) -> Result<(), NotificationError> {
        if self.failing_targets.lock().unwrap().contains(&email.to) {
            return Err(NotificationError::SendFailed(format!(
                "rejected recipient {}",
                email.to
            )));
        }
        self.sent_emails
            .lock()
            .unwrap()
            .push((email.clone(), *context));
        Ok(())
    }
}

// ===== MockSmsNotifier =====

enum SmsBehavior {
    Outcome(SmsOutcome),
    Fail(String),
}

/// 送信要求を記録するモック
///
/// デフォルトは `sent: true`、診断メッセージなし。
#[derive(Clone)]
pub struct MockSmsNotifier {
    requests: Arc<Mutex<Vec<SmsRequest>>>,
    behavior: Arc<Mutex<SmsBehavior>>,
}

impl Default for MockSmsNotifier {
    fn default() -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            behavior: Arc::new(Mutex::new(SmsBehavior::Outcome(SmsOutcome {
                sent:       true,
                diagnostic: None,
            }))),
        }
    }
}

impl MockSmsNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以降の送信で返す結果を設定する
    pub fn respond_with(&self, outcome: SmsOutcome) {
        *self.behavior.lock().unwrap() = SmsBehavior::Outcome(outcome);
    }

    /// 以降の送信を `SendFailed` で失敗させる
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.behavior.lock().unwrap() = SmsBehavior::Fail(message.into());
    }

    pub fn requests(&self) -> Vec<SmsRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsNotifier for MockSmsNotifier {
    async fn send(&self, request: &SmsRequest) -> Result<SmsOutcome, NotificationError> {
        self.requests.lock().unwrap().push(request.clone());
        match &*self.behavior.lock().unwrap() {
            SmsBehavior::Outcome(outcome) => Ok(outcome.clone()),
            SmsBehavior::Fail(message) => Err(NotificationError::SendFailed(message.clone())),
        }
    }
}

// ===== 送信先の集計ヘルパー =====

/// 宛先ごとの送信回数を数える
pub fn count_by_recipient(sender: &MockNotificationSender) -> HashMap<String, usize> {
    sender
        .recipients()
        .into_iter()
        .fold(HashMap::new(), |mut counts, to| {
            *counts.entry(to).or_insert(0) += 1;
            counts
        })
}
