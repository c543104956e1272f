//! # 入力検証
//!
//! リクエストペイロードを正規化し、必須項目を検証する。
//!
//! ## 寛容な型変換
//!
//! 呼び出し元は整数項目を数値・数字文字列・null のいずれでも送ってくる。
//! 整数項目は小数表記（`"7.0"`）も 0 方向に切り捨てて受け付け、解釈できなければ 0 とする。
//! 文字列項目は数値・`true` なら文字列化し（`1.0` は `"1"`）、`false`・null・欠落は
//! 空文字列として扱う。空かどうかの判定は後段で行う。
//!
//! ## 2 種類の終了
//!
//! - `resellerId` が空: エラーにせず [`InputOutcome::ShortCircuit`] で終了する
//! - `notificationType` が空: `ReturnOperationError::Validation` で失敗する

use returnflow_domain::{
    contractor::ContractorId,
    employee::EmployeeId,
    notification::{DispatchResult, NotificationType},
    return_status::{ReturnStatus, StatusDifferences},
    seller::SellerId,
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ReturnOperationError;

/// `resellerId` が空の場合に返す診断メッセージ
pub const EMPTY_RESELLER_MESSAGE: &str = "Empty resellerId";

/// 返品通知操作のリクエスト
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnOperationRequest {
    #[serde(default, deserialize_with = "lenient_int")]
    pub reseller_id:        i64,
    #[serde(default, deserialize_with = "lenient_int")]
    pub notification_type:  i64,
    #[serde(default, deserialize_with = "lenient_int")]
    pub client_id:          i64,
    #[serde(default, deserialize_with = "lenient_int")]
    pub creator_id:         i64,
    #[serde(default, deserialize_with = "lenient_int")]
    pub expert_id:          i64,
    #[serde(default, deserialize_with = "lenient_int")]
    pub complaint_id:       i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub complaint_number:   String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub consumption_id:     i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub consumption_number: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub agreement_number:   String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date:               String,
    #[serde(default, deserialize_with = "lenient_differences")]
    pub differences:        Option<DifferencesPayload>,
}

/// ステータス遷移の指定（`{from, to}`）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DifferencesPayload {
    #[serde(default, deserialize_with = "lenient_int")]
    pub from: i64,
    #[serde(default, deserialize_with = "lenient_int")]
    pub to:   i64,
}

/// 小数は 0 方向に切り捨てる（非有限値は 0）
fn truncate_float(f: f64) -> i64 {
    if f.is_finite() { f as i64 } else { 0 }
}

fn coerce_int(value: Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(truncate_float))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(truncate_float))
                .unwrap_or(0)
        }
        Value::Bool(b) => i64::from(b),
        _ => 0,
    }
}

/// 数値を文字列化する（整数値の小数は小数部を付けない）
fn number_to_string(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{f:.0}")
        }
        _ => n.to_string(),
    }
}

fn lenient_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?
        .map(coerce_int)
        .unwrap_or(0))
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => number_to_string(&n),
        Some(Value::Bool(true)) => "1".to_string(),
        _ => String::new(),
    })
}

/// 空のオブジェクト・配列・null は「指定なし」として扱う
fn lenient_differences<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DifferencesPayload>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(mut map)) if !map.is_empty() => Some(DifferencesPayload {
            from: map.remove("from").map(coerce_int).unwrap_or(0),
            to:   map.remove("to").map(coerce_int).unwrap_or(0),
        }),
        _ => None,
    })
}

/// 検証済みのリクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub reseller_id:        SellerId,
    pub notification_type:  NotificationType,
    pub client_id:          ContractorId,
    pub creator_id:         EmployeeId,
    pub expert_id:          EmployeeId,
    pub complaint_id:       i64,
    pub complaint_number:   String,
    pub consumption_id:     i64,
    pub consumption_number: String,
    pub agreement_number:   String,
    pub date:               String,
    pub differences:        Option<StatusDifferences>,
}

impl ValidatedRequest {
    /// 顧客通知の対象となる遷移先ステータス
    ///
    /// ステータス変更通知で、かつ遷移先が指定されている場合のみ `Some`。
    pub fn client_target_status(&self) -> Option<ReturnStatus> {
        match self.notification_type {
            NotificationType::Change => self.differences.and_then(|d| d.target()),
            _ => None,
        }
    }
}

/// 入力検証の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// 後続の処理に進む
    Proceed(ValidatedRequest),
    /// 処理を行わずにこの結果を返す
    ShortCircuit(DispatchResult),
}

/// リクエストを検証する
///
/// 副作用はなく、入力のみから結果が決まる。
pub fn validate(request: &ReturnOperationRequest) -> Result<InputOutcome, ReturnOperationError> {
    if request.reseller_id == 0 {
        return Ok(InputOutcome::ShortCircuit(DispatchResult::skipped(
            EMPTY_RESELLER_MESSAGE,
        )));
    }

    let notification_type = NotificationType::from_code(request.notification_type)?;

    Ok(InputOutcome::Proceed(ValidatedRequest {
        reseller_id: SellerId::new(request.reseller_id),
        notification_type,
        client_id: ContractorId::new(request.client_id),
        creator_id: EmployeeId::new(request.creator_id),
        expert_id: EmployeeId::new(request.expert_id),
        complaint_id: request.complaint_id,
        complaint_number: request.complaint_number.clone(),
        consumption_id: request.consumption_id,
        consumption_number: request.consumption_number.clone(),
        agreement_number: request.agreement_number.clone(),
        date: request.date.clone(),
        differences: request.differences.map(|d| {
            StatusDifferences::new(ReturnStatus::new(d.from), ReturnStatus::new(d.to))
        }),
    }))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn parse(value: Value) -> ReturnOperationRequest {
        serde_json::from_value(value).unwrap()
    }

    #[rstest]
    #[case(json!({"notificationType": 1}))]
    #[case(json!({"resellerId": 0, "notificationType": 1}))]
    #[case(json!({"resellerId": "", "notificationType": 1}))]
    #[case(json!({"resellerId": null, "notificationType": 1}))]
    #[case(json!({"resellerId": "abc", "notificationType": 0}))]
    fn reseller_idが空ならshort_circuitで終了する(#[case] payload: Value) {
        let outcome = validate(&parse(payload)).unwrap();

        assert_eq!(
            outcome,
            InputOutcome::ShortCircuit(DispatchResult::skipped("Empty resellerId"))
        );
    }

    #[rstest]
    #[case(json!({"resellerId": 7}))]
    #[case(json!({"resellerId": 7, "notificationType": 0}))]
    #[case(json!({"resellerId": "7", "notificationType": ""}))]
    #[case(json!({"resellerId": 7, "notificationType": null}))]
    fn notification_typeが空ならバリデーションエラー(#[case] payload: Value) {
        let err = validate(&parse(payload)).unwrap_err();

        assert!(matches!(
            err,
            ReturnOperationError::Validation(ref msg) if msg == "Empty notificationType"
        ));
    }

    #[test]
    fn 数字文字列を整数に変換する() {
        let request = parse(json!({
            "resellerId": "7",
            "notificationType": "2",
            "clientId": "42",
            "complaintNumber": 100,
            "differences": {"from": "1", "to": 2},
        }));

        assert_eq!(request.reseller_id, 7);
        assert_eq!(request.notification_type, 2);
        assert_eq!(request.client_id, 42);
        assert_eq!(request.complaint_number, "100");
        assert_eq!(request.differences, Some(DifferencesPayload { from: 1, to: 2 }));
    }

    #[rstest]
    #[case::小数表記の文字列(json!("7.0"), 7)]
    #[case::前後の空白(json!(" 7 "), 7)]
    #[case::小数は切り捨てる(json!("7.9"), 7)]
    #[case::数値の小数(json!(7.0), 7)]
    #[case::真偽値(json!(true), 1)]
    #[case::数値でない文字列(json!("abc"), 0)]
    fn 整数項目は数値と文字列で同じ値になる(#[case] value: Value, #[case] expected: i64) {
        let request = parse(json!({
            "resellerId": value,
            "notificationType": value,
            "clientId": value,
        }));

        assert_eq!(request.reseller_id, expected);
        assert_eq!(request.notification_type, expected);
        assert_eq!(request.client_id, expected);
    }

    #[test]
    fn 小数表記の文字列のreseller_idでも処理を続行する() {
        let request = parse(json!({"resellerId": "7.0", "notificationType": "2.0"}));

        let InputOutcome::Proceed(validated) = validate(&request).unwrap() else {
            panic!("Proceed を期待");
        };

        assert_eq!(validated.reseller_id, SellerId::new(7));
        assert_eq!(validated.notification_type, NotificationType::Change);
    }

    #[rstest]
    #[case::真(json!(true), "1")]
    #[case::偽(json!(false), "")]
    #[case::整数値の小数(json!(1.0), "1")]
    #[case::小数(json!(1.5), "1.5")]
    #[case::整数(json!(42), "42")]
    #[case::文字列(json!("A-1"), "A-1")]
    fn 文字列項目はスカラー値を文字列化する(#[case] value: Value, #[case] expected: &str) {
        let request = parse(json!({"agreementNumber": value}));

        assert_eq!(request.agreement_number, expected);
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!({}))]
    #[case(json!([]))]
    fn 空のdifferencesは指定なしとして扱う(#[case] differences: Value) {
        let request = parse(json!({"resellerId": 7, "differences": differences}));

        assert_eq!(request.differences, None);
    }

    #[test]
    fn 検証済みリクエストに変換する() {
        let request = parse(json!({
            "resellerId": 7,
            "notificationType": 2,
            "clientId": 42,
            "creatorId": 3,
            "expertId": 4,
            "complaintId": 10,
            "complaintNumber": "C-10",
            "consumptionId": 5,
            "consumptionNumber": "R-5",
            "agreementNumber": "A-1",
            "date": "2024-01-31",
            "differences": {"from": 1, "to": 2},
        }));

        let InputOutcome::Proceed(validated) = validate(&request).unwrap() else {
            panic!("Proceed を期待");
        };

        assert_eq!(validated.reseller_id, SellerId::new(7));
        assert_eq!(validated.notification_type, NotificationType::Change);
        assert_eq!(validated.client_id, ContractorId::new(42));
        assert_eq!(
            validated.differences,
            Some(StatusDifferences::new(ReturnStatus::PENDING, ReturnStatus::REJECTED))
        );
        assert_eq!(validated.client_target_status(), Some(ReturnStatus::REJECTED));
    }

    #[rstest]
    #[case(1, Some((1, 2)), None)]
    #[case(2, Some((1, 0)), None)]
    #[case(2, None, None)]
    #[case(2, Some((0, 1)), Some(ReturnStatus::PENDING))]
    fn client_target_statusは変更通知かつ遷移先がある場合のみ返す(
        #[case] notification_type: i64,
        #[case] differences: Option<(i64, i64)>,
        #[case] expected: Option<ReturnStatus>,
    ) {
        let request = ReturnOperationRequest {
            reseller_id: 7,
            notification_type,
            differences: differences.map(|(from, to)| DifferencesPayload { from, to }),
            ..ReturnOperationRequest::default()
        };

        let InputOutcome::Proceed(validated) = validate(&request).unwrap() else {
            panic!("Proceed を期待");
        };

        assert_eq!(validated.client_target_status(), expected);
    }
}
