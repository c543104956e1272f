//! 返品通知テストビルダー
//!
//! テストコードの重複を削減するためのビルダーパターン実装。
//! 標準的なテストデータとモックコラボレータのセットアップを提供する。
//!
//! ## 標準データ
//!
//! | 項目 | 値 |
//! |------|----|
//! | 販売者 | ID 7 "Shop"、送信元 `shop@example.com` |
//! | 顧客 | ID 42 "Ivan Ivanov"（販売者 7 の顧客）、メール・携帯あり |
//! | 起票者 / 査定者 | ID 3 "Petr Petrov" / ID 4 "Sidor Sidorov" |
//! | 通知先従業員 | `manager@example.com` |

use std::sync::Arc;

use returnflow_domain::{
    contractor::{Contractor, ContractorId, ContractorType},
    employee::{Employee, EmployeeId},
    notification::NotificationPermission,
    seller::{Seller, SellerId},
};
use returnflow_infra::{
    mock::{
        MockContractorRepository,
        MockEmployeeRepository,
        MockNotificationSender,
        MockSellerRepository,
        MockSmsNotifier,
    },
    settings::{StaticPermissionDirectory, StaticResellerSettings},
    status_catalog::{StaticStatusCatalog, StatusCatalog},
};
use serde_json::{Value, json};

use crate::usecase::{
    ReturnNotificationDeps,
    ReturnNotificationUseCase,
    ReturnOperationRequest,
    return_notification::{Locale, TeraLocalizer},
};

/// 返品通知テストのセットアップデータ
///
/// ReturnNotificationTestBuilder が生成する SUT とモックのセット。
pub struct ReturnNotificationTestSetup {
    pub sut:             ReturnNotificationUseCase,
    pub seller_repo:     MockSellerRepository,
    pub contractor_repo: MockContractorRepository,
    pub employee_repo:   MockEmployeeRepository,
    pub sender:          MockNotificationSender,
    pub sms:             MockSmsNotifier,
}

/// 返品通知テストビルダー
///
/// # 使用例
///
/// ```ignore
/// use returnflow_core_service::test_utils::ReturnNotificationTestBuilder;
///
/// #[tokio::test]
/// async fn test_example() {
///     let setup = ReturnNotificationTestBuilder::new().build();
///     let request = ReturnNotificationTestBuilder::change_request(1, 2);
///
///     let result = setup.sut.do_operation(&request).await.unwrap();
///     assert!(result.notification_client_by_email);
/// }
/// ```
pub struct ReturnNotificationTestBuilder {
    from_address:    Option<String>,
    employee_emails: Vec<String>,
    client:          Contractor,
    status_catalog:  Arc<dyn StatusCatalog>,
    locale:          Locale,
}

impl Default for ReturnNotificationTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReturnNotificationTestBuilder {
    pub const RESELLER_ID: i64 = 7;
    pub const CLIENT_ID: i64 = 42;
    pub const CREATOR_ID: i64 = 3;
    pub const EXPERT_ID: i64 = 4;
    pub const FROM_ADDRESS: &'static str = "shop@example.com";
    pub const EMPLOYEE_EMAIL: &'static str = "manager@example.com";
    pub const CLIENT_EMAIL: &'static str = "ivan@example.com";

    /// 標準データで新しいビルダーを作成
    pub fn new() -> Self {
        Self {
            from_address:    Some(Self::FROM_ADDRESS.to_string()),
            employee_emails: vec![Self::EMPLOYEE_EMAIL.to_string()],
            client:          Self::standard_client(),
            status_catalog:  Arc::new(StaticStatusCatalog::default()),
            locale:          Locale::En,
        }
    }

    /// 標準の顧客（販売者 7 の顧客、メール・携帯あり）
    pub fn standard_client() -> Contractor {
        Contractor::new(
            ContractorId::new(Self::CLIENT_ID),
            ContractorType::Customer,
            SellerId::new(Self::RESELLER_ID),
            "Ivanov",
        )
        .with_full_name("Ivan Ivanov")
        .with_email(Self::CLIENT_EMAIL)
        .with_mobile("+79990000000")
    }

    /// 送信元アドレスを未設定にする
    pub fn without_from_address(mut self) -> Self {
        self.from_address = None;
        self
    }

    /// 通知先従業員のメールアドレスを指定
    pub fn with_employee_emails(mut self, emails: &[&str]) -> Self {
        self.employee_emails = emails.iter().map(|e| e.to_string()).collect();
        self
    }

    /// 顧客を指定
    pub fn with_client(mut self, client: Contractor) -> Self {
        self.client = client;
        self
    }

    /// ステータスカタログを指定
    pub fn with_status_catalog(mut self, status_catalog: Arc<dyn StatusCatalog>) -> Self {
        self.status_catalog = status_catalog;
        self
    }

    /// ロケールを指定
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// SUT とモックを構築する
    pub fn build(self) -> ReturnNotificationTestSetup {
        let reseller_id = SellerId::new(Self::RESELLER_ID);

        let seller_repo = MockSellerRepository::new();
        seller_repo.add_seller(Seller::new(reseller_id, "Shop"));

        let contractor_repo = MockContractorRepository::new();
        contractor_repo.add_contractor(self.client);

        let employee_repo = MockEmployeeRepository::new();
        employee_repo.add_employee(Employee::new(EmployeeId::new(Self::CREATOR_ID), "Petr Petrov"));
        employee_repo.add_employee(Employee::new(EmployeeId::new(Self::EXPERT_ID), "Sidor Sidorov"));

        let sender = MockNotificationSender::new();
        let sms = MockSmsNotifier::new();

        let localizer = TeraLocalizer::new(self.locale)
            .expect("埋め込みテンプレートの登録に失敗");

        let sut = ReturnNotificationUseCase::new(ReturnNotificationDeps {
            seller_repo:       Arc::new(seller_repo.clone()),
            contractor_repo:   Arc::new(contractor_repo.clone()),
            employee_repo:     Arc::new(employee_repo.clone()),
            status_catalog:    self.status_catalog,
            localizer:         Arc::new(localizer),
            reseller_settings: Arc::new(StaticResellerSettings::new(self.from_address)),
            permissions:       Arc::new(StaticPermissionDirectory::new().with_emails(
                reseller_id,
                NotificationPermission::GoodsReturn,
                self.employee_emails,
            )),
            sender:            Arc::new(sender.clone()),
            sms_notifier:      Arc::new(sms.clone()),
        });

        ReturnNotificationTestSetup {
            sut,
            seller_repo,
            contractor_repo,
            employee_repo,
            sender,
            sms,
        }
    }

    /// 標準データに合うリクエストの JSON（新規明細の通知）
    pub fn request_json() -> Value {
        json!({
            "resellerId": Self::RESELLER_ID,
            "notificationType": 1,
            "clientId": Self::CLIENT_ID,
            "creatorId": Self::CREATOR_ID,
            "expertId": Self::EXPERT_ID,
            "complaintId": 10,
            "complaintNumber": "C-10",
            "consumptionId": 5,
            "consumptionNumber": "R-5",
            "agreementNumber": "A-1",
            "date": "2024-01-31",
        })
    }

    /// JSON を上書きしてリクエストを作成する
    pub fn request_with(overrides: Value) -> ReturnOperationRequest {
        let mut request = Self::request_json();
        if let (Some(base), Value::Object(overrides)) = (request.as_object_mut(), overrides) {
            base.extend(overrides);
        }
        serde_json::from_value(request).expect("リクエストの JSON が不正")
    }

    /// 新規明細の通知リクエスト
    pub fn new_request() -> ReturnOperationRequest {
        Self::request_with(json!({}))
    }

    /// ステータス変更の通知リクエスト
    pub fn change_request(from: i64, to: i64) -> ReturnOperationRequest {
        Self::request_with(json!({
            "notificationType": 2,
            "differences": {"from": from, "to": to},
        }))
    }
}
