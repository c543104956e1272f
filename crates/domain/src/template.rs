//! # テンプレートデータ
//!
//! 通知メッセージ（メール件名・本文、SMS）に埋め込む名前付きフィールドの集合。
//!
//! ## 設計方針
//!
//! - **順序付きマッピング**: フィールドは [`TemplateField::ALL`] の順に保持し、
//!   検証やシリアライズの順序を安定させる
//! - **整数と文字列の共存**: ID 系は整数、それ以外は文字列として保持する
//! - **空判定**: 整数 0、空文字列、文字列 `"0"` を「空」とみなす。1 つでも空があれば通知しない

use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeMap};
use strum::IntoStaticStr;

/// テンプレートフィールド名
///
/// メッセージテンプレート側では `SCREAMING_SNAKE_CASE` の名前で参照される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateField {
    ComplaintId,
    ComplaintNumber,
    CreatorId,
    CreatorName,
    ExpertId,
    ExpertName,
    ClientId,
    ClientName,
    ConsumptionId,
    ConsumptionNumber,
    AgreementNumber,
    Date,
    Differences,
}

impl TemplateField {
    /// 全フィールド（組み立て・検証の順序）
    pub const ALL: [TemplateField; 13] = [
        Self::ComplaintId,
        Self::ComplaintNumber,
        Self::CreatorId,
        Self::CreatorName,
        Self::ExpertId,
        Self::ExpertName,
        Self::ClientId,
        Self::ClientName,
        Self::ConsumptionId,
        Self::ConsumptionNumber,
        Self::AgreementNumber,
        Self::Date,
        Self::Differences,
    ];

    /// テンプレート上の名前（例: `"CLIENT_NAME"`）
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// テンプレートフィールドの値
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateValue {
    Int(i64),
    Text(String),
}

impl TemplateValue {
    /// 空か（整数 0、空文字列、または文字列 `"0"`）
    ///
    /// 文字列化すると同じ `"0"` になる値は、整数でも文字列でも空として扱う。
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Int(value) => *value == 0,
            Self::Text(value) => value.is_empty() || value == "0",
        }
    }
}

impl fmt::Display for TemplateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl Serialize for TemplateValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Text(value) => serializer.serialize_str(value),
        }
    }
}

impl From<i64> for TemplateValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// テンプレートデータ（順序付きマッピング）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateData {
    entries: Vec<(TemplateField, TemplateValue)>,
}

impl TemplateData {
    pub fn new() -> Self {
        Self::default()
    }

    /// フィールドを設定した新しいインスタンスを返す
    ///
    /// 既に設定済みのフィールドは値を置き換え、位置は保持する。
    pub fn with(mut self, field: TemplateField, value: impl Into<TemplateValue>) -> Self {
        let value = value.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }
        self
    }

    pub fn get(&self, field: TemplateField) -> Option<&TemplateValue> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TemplateField, &TemplateValue)> {
        self.entries.iter().map(|(field, value)| (*field, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 最初に見つかった空のフィールドを返す
    ///
    /// 未設定のフィールドも空として扱う。判定順は [`TemplateField::ALL`]。
    pub fn first_empty_field(&self) -> Option<TemplateField> {
        TemplateField::ALL
            .into_iter()
            .find(|field| self.get(*field).is_none_or(TemplateValue::is_empty))
    }

    /// テンプレート変数（名前 → 文字列）に変換する
    pub fn to_vars(&self) -> TemplateVars {
        self.iter()
            .fold(TemplateVars::new(), |vars, (field, value)| {
                vars.with(field.as_str(), value.to_string())
            })
    }
}

impl Serialize for TemplateData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, value) in &self.entries {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.end()
    }
}

/// テンプレート変数
///
/// ローカライズ済み文字列のレンダリングに渡す置換変数。
/// [`TemplateData`] から変換するか、ステータス名など個別に組み立てる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    entries: Vec<(&'static str, String)>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.entries.push((name, value.into()));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
