//! 返品通知ユースケースの統合テスト
//!
//! ReturnNotificationTestBuilder で標準データとモックを組み立て、
//! 入力検証からチャネル送信までを通して検証する。

use std::sync::Arc;

use http::StatusCode;
use pretty_assertions::assert_eq;
use returnflow_core_service::{
    error::{ErrorKind, ReturnOperationError},
    test_utils::ReturnNotificationTestBuilder,
    usecase::return_notification::Locale,
};
use returnflow_domain::{
    contractor::{Contractor, ContractorId, ContractorType},
    notification::{DispatchResult, MessageContext, NotificationEvent, SmsDeliveryResult, SmsOutcome},
    return_status::ReturnStatus,
    seller::SellerId,
    template::{TemplateField, TemplateValue},
};
use returnflow_infra::mock::{FailingStatusCatalog, count_by_recipient};
use rstest::rstest;
use serde_json::json;

const EMPLOYEE_SUBJECT: &str = "Return No. C-10: complaint updated";
const CLIENT_SUBJECT: &str = "Your return No. C-10: status changed";

fn reseller_id() -> SellerId {
    SellerId::new(ReturnNotificationTestBuilder::RESELLER_ID)
}

// ===== 正常系 =====

#[tokio::test]
async fn test_新規明細の通知は従業員にのみ送信される() {
    // Arrange
    let setup = ReturnNotificationTestBuilder::new().build();
    let request = ReturnNotificationTestBuilder::new_request();

    // Act
    let result = setup.sut.do_operation(&request).await.unwrap();

    // Assert
    assert_eq!(
        result,
        DispatchResult {
            notification_employee_by_email: true,
            ..DispatchResult::default()
        }
    );

    let sent = setup.sender.sent_emails();
    assert_eq!(sent.len(), 1);
    let (email, context) = &sent[0];
    assert_eq!(email.from, ReturnNotificationTestBuilder::FROM_ADDRESS);
    assert_eq!(email.to, ReturnNotificationTestBuilder::EMPLOYEE_EMAIL);
    assert_eq!(email.subject, EMPLOYEE_SUBJECT);
    assert!(email.body.contains("Changes: New position added"));
    assert!(email.body.contains("Client: Ivan Ivanov (ID 42)"));
    assert!(email.body.contains("Created by: Petr Petrov (ID 3)"));
    assert!(email.body.contains("Expert: Sidor Sidorov (ID 4)"));
    assert_eq!(
        *context,
        MessageContext::for_employees(reseller_id(), NotificationEvent::ChangeReturnStatus)
    );

    assert!(setup.sms.requests().is_empty());
}

#[tokio::test]
async fn test_ステータス変更の通知は全チャネルに送信される() {
    // Arrange
    let setup = ReturnNotificationTestBuilder::new().build();
    let request = ReturnNotificationTestBuilder::change_request(1, 2);

    // Act
    let result = setup.sut.do_operation(&request).await.unwrap();

    // Assert
    assert_eq!(
        result,
        DispatchResult {
            notification_employee_by_email: true,
            notification_client_by_email:   true,
            notification_client_by_sms:     SmsDeliveryResult {
                is_sent: true,
                message: String::new(),
            },
        }
    );

    assert_eq!(
        setup.sender.recipients(),
        vec![
            ReturnNotificationTestBuilder::EMPLOYEE_EMAIL.to_string(),
            ReturnNotificationTestBuilder::CLIENT_EMAIL.to_string(),
        ]
    );

    let sent = setup.sender.sent_emails();
    let (client_email, client_context) = &sent[1];
    assert_eq!(client_email.subject, CLIENT_SUBJECT);
    assert!(client_email.body.starts_with("Hello, Ivan Ivanov!"));
    assert!(
        client_email
            .body
            .contains(r#"Position status has changed from "Pending" to "Rejected""#)
    );
    assert_eq!(
        *client_context,
        MessageContext::for_client(
            reseller_id(),
            NotificationEvent::ChangeReturnStatus,
            ContractorId::new(ReturnNotificationTestBuilder::CLIENT_ID),
            ReturnStatus::REJECTED,
        )
    );

    let sms_requests = setup.sms.requests();
    assert_eq!(sms_requests.len(), 1);
    let sms = &sms_requests[0];
    assert_eq!(sms.reseller_id, reseller_id());
    assert_eq!(sms.client_id.as_i64(), ReturnNotificationTestBuilder::CLIENT_ID);
    assert_eq!(sms.event, NotificationEvent::ChangeReturnStatus);
    assert_eq!(sms.status, ReturnStatus::REJECTED);
    assert_eq!(
        sms.template_data.get(TemplateField::Differences),
        Some(&TemplateValue::Text(
            r#"Position status has changed from "Pending" to "Rejected""#.to_string()
        ))
    );
}

#[tokio::test]
async fn test_遷移先が未設定のステータス変更は顧客チャネルを使わない() {
    // Arrange
    let setup = ReturnNotificationTestBuilder::new().build();
    let request = ReturnNotificationTestBuilder::change_request(1, 0);

    // Act
    let result = setup.sut.do_operation(&request).await.unwrap();

    // Assert
    assert_eq!(
        result,
        DispatchResult {
            notification_employee_by_email: true,
            ..DispatchResult::default()
        }
    );
    assert_eq!(
        setup.sender.recipients(),
        vec![ReturnNotificationTestBuilder::EMPLOYEE_EMAIL.to_string()]
    );
    assert!(setup.sms.requests().is_empty());
}

#[tokio::test]
async fn test_通知先従業員ごとに1通ずつ送信される() {
    // Arrange
    let setup = ReturnNotificationTestBuilder::new()
        .with_employee_emails(&["a@example.com", "b@example.com", "c@example.com"])
        .build();
    let request = ReturnNotificationTestBuilder::new_request();

    // Act
    let result = setup.sut.do_operation(&request).await.unwrap();

    // Assert
    assert!(result.notification_employee_by_email);
    let counts = count_by_recipient(&setup.sender);
    assert_eq!(counts.len(), 3);
    assert!(counts.values().all(|count| *count == 1));
}

#[tokio::test]
async fn test_同じリクエストからは同じメッセージが生成される() {
    // Arrange
    let setup = ReturnNotificationTestBuilder::new().build();
    let request = ReturnNotificationTestBuilder::change_request(1, 2);

    // Act
    setup.sut.do_operation(&request).await.unwrap();
    setup.sut.do_operation(&request).await.unwrap();

    // Assert
    let sent = setup.sender.sent_emails();
    assert_eq!(sent.len(), 4);
    assert_eq!(&sent[0..2], &sent[2..4]);

    let sms_requests = setup.sms.requests();
    assert_eq!(
        sms_requests[0].template_data,
        sms_requests[1].template_data
    );
}

#[tokio::test]
async fn test_数字文字列のidも受け付ける() {
    // Arrange
    let setup = ReturnNotificationTestBuilder::new().build();
    let request = ReturnNotificationTestBuilder::request_with(json!({
        "resellerId": "7",
        "clientId": "42",
        "complaintNumber": 10,
    }));

    // Act
    let result = setup.sut.do_operation(&request).await.unwrap();

    // Assert
    assert!(result.notification_employee_by_email);
    assert_eq!(
        setup.sender.sent_emails()[0].0.subject,
        "Return No. 10: complaint updated"
    );
}

#[rstest]
#[case::小数表記の文字列(json!({"resellerId": "7.0", "clientId": "42.0"}))]
#[case::前後に空白のある文字列(json!({"resellerId": " 7 ", "clientId": " 42 "}))]
#[case::真の契約番号(json!({"agreementNumber": true}))]
#[case::整数値の小数の消費番号(json!({"consumptionNumber": 5.0}))]
#[tokio::test]
async fn test_表記の揺れた入力でも通知を送信する(#[case] overrides: serde_json::Value) {
    // Arrange
    let setup = ReturnNotificationTestBuilder::new().build();
    let request = ReturnNotificationTestBuilder::request_with(overrides);

    // Act
    let result = setup.sut.do_operation(&request).await.unwrap();

    // Assert
    assert!(result.notification_employee_by_email);
    assert_eq!(setup.sender.sent_emails().len(), 1);
}

#[tokio::test]
async fn test_整数値の小数は小数部なしで文言に埋め込まれる() {
    // Arrange
    let setup = ReturnNotificationTestBuilder::new().build();
    let request = ReturnNotificationTestBuilder::request_with(json!({"complaintNumber": 10.0}));

    // Act
    setup.sut.do_operation(&request).await.unwrap();

    // Assert
    assert_eq!(
        setup.sender.sent_emails()[0].0.subject,
        "Return No. 10: complaint updated"
    );
}

#[tokio::test]
async fn test_販売者のロケールで文言が生成される() {
    // Arrange
    let setup = ReturnNotificationTestBuilder::new()
        .with_locale(Locale::Ru)
        .build();
    let request = ReturnNotificationTestBuilder::new_request();

    // Act
    setup.sut.do_operation(&request).await.unwrap();

    // Assert
    let sent = setup.sender.sent_emails();
    assert!(sent[0].0.body.contains("Добавлена новая позиция"));
}

// ===== 販売者設定の欠落 =====

#[tokio::test]
async fn test_通知先従業員がいなくても顧客チャネルは評価される() {
    // Arrange
    let setup = ReturnNotificationTestBuilder::new()
        .with_employee_emails(&[])
        .build();
    let request = ReturnNotificationTestBuilder::change_request(1, 2);

    // Act
    let result = setup.sut.do_operation(&request).await.unwrap();

    // Assert
    assert!(!result.notification_employee_by_email);
    assert!(result.notification_client_by_email);
    assert!(result.notification_client_by_sms.is_sent);
    assert_eq!(
        setup.sender.recipients(),
        vec![ReturnNotificationTestBuilder::CLIENT_EMAIL.to_string()]
    );
}

#[tokio::test]
async fn test_送信元アドレスがなければメールは送らずsmsのみ送信する() {
    // Arrange
    let setup = ReturnNotificationTestBuilder::new()
        .without_from_address()
        .build();
    let request = ReturnNotificationTestBuilder::change_request(1, 2);

    // Act
    let result = setup.sut.do_operation(&request).await.unwrap();

    // Assert
    assert!(!result.notification_employee_by_email);
    assert!(!result.notification_client_by_email);
    assert!(result.notification_client_by_sms.is_sent);
    assert!(setup.sender.sent_emails().is_empty());
    assert_eq!(setup.sms.requests().len(), 1);
}

#[tokio::test]
async fn test_連絡先のない顧客には顧客チャネルで送信しない() {
    // Arrange
    let client = Contractor::new(
        ContractorId::new(ReturnNotificationTestBuilder::CLIENT_ID),
        ContractorType::Customer,
        reseller_id(),
        "Ivanov",
    );
    let setup = ReturnNotificationTestBuilder::new()
        .with_client(client)
        .build();
    let request = ReturnNotificationTestBuilder::change_request(1, 2);

    // Act
    let result = setup.sut.do_operation(&request).await.unwrap();

    // Assert
    assert_eq!(
        result,
        DispatchResult {
            notification_employee_by_email: true,
            ..DispatchResult::default()
        }
    );
    assert!(setup.sms.requests().is_empty());
}

// ===== チャネル単位の失敗 =====

#[tokio::test]
async fn test_従業員メールの送信失敗でも従業員フラグは立ち他チャネルは続行する() {
    // Arrange
    let setup = ReturnNotificationTestBuilder::new().build();
    setup
        .sender
        .fail_for(ReturnNotificationTestBuilder::EMPLOYEE_EMAIL);
    let request = ReturnNotificationTestBuilder::change_request(1, 2);

    // Act
    let result = setup.sut.do_operation(&request).await.unwrap();

    // Assert
    assert!(result.notification_employee_by_email);
    assert!(result.notification_client_by_email);
    assert!(result.notification_client_by_sms.is_sent);
}

#[tokio::test]
async fn test_顧客メールの送信失敗は顧客メールフラグにのみ反映される() {
    // Arrange
    let setup = ReturnNotificationTestBuilder::new().build();
    setup
        .sender
        .fail_for(ReturnNotificationTestBuilder::CLIENT_EMAIL);
    let request = ReturnNotificationTestBuilder::change_request(1, 2);

    // Act
    let result = setup.sut.do_operation(&request).await.unwrap();

    // Assert
    assert!(result.notification_employee_by_email);
    assert!(!result.notification_client_by_email);
    assert!(result.notification_client_by_sms.is_sent);
}

#[rstest]
#[case::成功時の診断メッセージも保持する(
    SmsOutcome { sent: true, diagnostic: Some("queued".to_string()) },
    SmsDeliveryResult { is_sent: true, message: "queued".to_string() }
)]
#[case::送信されなかった理由を記録する(
    SmsOutcome { sent: false, diagnostic: Some("invalid phone".to_string()) },
    SmsDeliveryResult { is_sent: false, message: "invalid phone".to_string() }
)]
#[case::診断メッセージがなければ空文字列(
    SmsOutcome { sent: false, diagnostic: None },
    SmsDeliveryResult { is_sent: false, message: String::new() }
)]
#[tokio::test]
async fn test_sms送信基盤の応答が結果に反映される(
    #[case] outcome: SmsOutcome,
    #[case] expected: SmsDeliveryResult,
) {
    // Arrange
    let setup = ReturnNotificationTestBuilder::new().build();
    setup.sms.respond_with(outcome);
    let request = ReturnNotificationTestBuilder::change_request(1, 2);

    // Act
    let result = setup.sut.do_operation(&request).await.unwrap();

    // Assert
    assert_eq!(result.notification_client_by_sms, expected);
    assert!(result.notification_client_by_email);
}

#[tokio::test]
async fn test_sms送信基盤の障害はエラーメッセージとして記録される() {
    // Arrange
    let setup = ReturnNotificationTestBuilder::new().build();
    setup.sms.fail_with("gateway timeout");
    let request = ReturnNotificationTestBuilder::change_request(1, 2);

    // Act
    let result = setup.sut.do_operation(&request).await.unwrap();

    // Assert
    assert!(!result.notification_client_by_sms.is_sent);
    assert!(
        result
            .notification_client_by_sms
            .message
            .contains("gateway timeout")
    );
    assert!(result.notification_employee_by_email);
    assert!(result.notification_client_by_email);
}

// ===== 早期終了とエラー =====

#[rstest]
#[case::未指定(json!({"resellerId": null}))]
#[case::ゼロ(json!({"resellerId": 0}))]
#[case::空文字列(json!({"resellerId": ""}))]
#[tokio::test]
async fn test_販売者が空なら何も参照せずスキップ結果を返す(#[case] overrides: serde_json::Value) {
    // Arrange
    let setup = ReturnNotificationTestBuilder::new().build();
    // ストアを参照すればエラーになる
    setup.seller_repo.set_unavailable();
    let request = ReturnNotificationTestBuilder::request_with(overrides);

    // Act
    let result = setup.sut.do_operation(&request).await.unwrap();

    // Assert
    assert_eq!(result, DispatchResult::skipped("Empty resellerId"));
    assert!(setup.sender.sent_emails().is_empty());
    assert!(setup.sms.requests().is_empty());
}

#[tokio::test]
async fn test_通知種別が空ならバリデーションエラー() {
    // Arrange
    let setup = ReturnNotificationTestBuilder::new().build();
    let request = ReturnNotificationTestBuilder::request_with(json!({"notificationType": 0}));

    // Act
    let err = setup.sut.do_operation(&request).await.unwrap_err();

    // Assert
    assert!(matches!(err, ReturnOperationError::Validation(ref msg) if msg == "Empty notificationType"));
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert!(setup.sender.sent_emails().is_empty());
}

#[rstest]
#[case::他の販売者の顧客(Contractor::new(
    ContractorId::new(ReturnNotificationTestBuilder::CLIENT_ID),
    ContractorType::Customer,
    SellerId::new(8),
    "Ivanov",
))]
#[case::顧客以外の区分(Contractor::new(
    ContractorId::new(ReturnNotificationTestBuilder::CLIENT_ID),
    ContractorType::Other(1),
    SellerId::new(ReturnNotificationTestBuilder::RESELLER_ID),
    "Supplier",
))]
#[tokio::test]
async fn test_販売者の顧客でなければclient_not_found(#[case] client: Contractor) {
    // Arrange
    let setup = ReturnNotificationTestBuilder::new()
        .with_client(client)
        .build();
    let request = ReturnNotificationTestBuilder::change_request(1, 2);

    // Act
    let err = setup.sut.do_operation(&request).await.unwrap_err();

    // Assert
    assert_eq!(err.to_string(), "Client not found!");
    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert!(setup.sender.sent_emails().is_empty());
    assert!(setup.sms.requests().is_empty());
}

#[rstest]
#[case::クレーム番号(json!({"complaintNumber": ""}), "Template Data (COMPLAINT_NUMBER) is empty!")]
#[case::文字列の0のクレーム番号(json!({"complaintNumber": "0"}), "Template Data (COMPLAINT_NUMBER) is empty!")]
#[case::偽の契約番号(json!({"agreementNumber": false}), "Template Data (AGREEMENT_NUMBER) is empty!")]
#[case::消費id(json!({"consumptionId": 0}), "Template Data (CONSUMPTION_ID) is empty!")]
#[case::日付(json!({"date": null}), "Template Data (DATE) is empty!")]
#[case::未定義の通知種別(json!({"notificationType": 3}), "Template Data (DIFFERENCES) is empty!")]
#[tokio::test]
async fn test_空のテンプレートフィールドがあれば送信しない(
    #[case] overrides: serde_json::Value,
    #[case] expected: &str,
) {
    // Arrange
    let setup = ReturnNotificationTestBuilder::new().build();
    let request = ReturnNotificationTestBuilder::request_with(overrides);

    // Act
    let err = setup.sut.do_operation(&request).await.unwrap_err();

    // Assert
    assert!(matches!(err, ReturnOperationError::TemplateData { .. }));
    assert_eq!(err.to_string(), expected);
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(setup.sender.sent_emails().is_empty());
    assert!(setup.sms.requests().is_empty());
}

#[tokio::test]
async fn test_ステータス名が取得できなければ差分文言が空になり送信しない() {
    // Arrange
    let setup = ReturnNotificationTestBuilder::new()
        .with_status_catalog(Arc::new(FailingStatusCatalog))
        .build();
    let request = ReturnNotificationTestBuilder::change_request(1, 2);

    // Act
    let err = setup.sut.do_operation(&request).await.unwrap_err();

    // Assert
    assert_eq!(err.to_string(), "Template Data (DIFFERENCES) is empty!");
    assert!(setup.sender.sent_emails().is_empty());
    assert!(setup.sms.requests().is_empty());
}

#[tokio::test]
async fn test_idストアの障害は内部エラーになる() {
    // Arrange
    let setup = ReturnNotificationTestBuilder::new().build();
    setup.seller_repo.set_unavailable();
    let request = ReturnNotificationTestBuilder::new_request();

    // Act
    let err = setup.sut.do_operation(&request).await.unwrap_err();

    // Assert
    assert!(matches!(err, ReturnOperationError::Infra(_)));
    let response = err.to_error_response();
    assert_eq!(response.status, 500);
    assert!(setup.sender.sent_emails().is_empty());
}
