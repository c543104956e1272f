//! # ローカライザー
//!
//! 販売者ごとのロケールでメッセージ文言を生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: 文言テンプレートはバイナリに埋め込まれる
//! - **テンプレート名**: `{locale}/{MessageKey}`（例: `ru/PositionStatusHasChanged`）
//! - **ロケール解決**: 販売者ごとの上書きがなければデフォルトロケールを使う
//!
//! テンプレート内の変数は `TemplateVars` の名前（`CLIENT_NAME`、`FROM` など）で参照する。

use std::collections::HashMap;

use returnflow_domain::{
    notification::{MessageKey, NotificationError},
    seller::SellerId,
    template::TemplateVars,
};
use tera::{Context, Tera};

/// ローカライズ済み文言のレンダリング
pub trait Localizer: Send + Sync {
    /// 販売者のロケールで文言をレンダリングする
    fn render(
        &self,
        key: MessageKey,
        vars: &TemplateVars,
        reseller_id: SellerId,
    ) -> Result<String, NotificationError>;
}

/// 対応ロケール
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

macro_rules! locale_templates {
    ($locale:literal) => {
        vec![
            (
                concat!($locale, "/NewPositionAdded"),
                include_str!(concat!("../../../templates/messages/", $locale, "/NewPositionAdded.txt")),
            ),
            (
                concat!($locale, "/PositionStatusHasChanged"),
                include_str!(concat!(
                    "../../../templates/messages/",
                    $locale,
                    "/PositionStatusHasChanged.txt"
                )),
            ),
            (
                concat!($locale, "/complaintEmployeeEmailSubject"),
                include_str!(concat!(
                    "../../../templates/messages/",
                    $locale,
                    "/complaintEmployeeEmailSubject.txt"
                )),
            ),
            (
                concat!($locale, "/complaintEmployeeEmailBody"),
                include_str!(concat!(
                    "../../../templates/messages/",
                    $locale,
                    "/complaintEmployeeEmailBody.txt"
                )),
            ),
            (
                concat!($locale, "/complaintClientEmailSubject"),
                include_str!(concat!(
                    "../../../templates/messages/",
                    $locale,
                    "/complaintClientEmailSubject.txt"
                )),
            ),
            (
                concat!($locale, "/complaintClientEmailBody"),
                include_str!(concat!(
                    "../../../templates/messages/",
                    $locale,
                    "/complaintClientEmailBody.txt"
                )),
            ),
        ]
    };
}

/// tera テンプレートエンジンによるローカライザー
pub struct TeraLocalizer {
    engine:          Tera,
    default_locale:  Locale,
    reseller_locale: HashMap<SellerId, Locale>,
}

impl TeraLocalizer {
    /// 新しいローカライザーを作成
    ///
    /// `include_str!` で埋め込んだ全ロケールのテンプレートを tera に登録する。
    pub fn new(default_locale: Locale) -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(
                locale_templates!("ru")
                    .into_iter()
                    .chain(locale_templates!("en")),
            )
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self {
            engine,
            default_locale,
            reseller_locale: HashMap::new(),
        })
    }

    /// 販売者のロケールを設定する
    pub fn with_reseller_locale(mut self, reseller_id: SellerId, locale: Locale) -> Self {
        self.reseller_locale.insert(reseller_id, locale);
        self
    }

    pub fn locale_for(&self, reseller_id: SellerId) -> Locale {
        self.reseller_locale
            .get(&reseller_id)
            .copied()
            .unwrap_or(self.default_locale)
    }
}

impl Localizer for TeraLocalizer {
    fn render(
        &self,
        key: MessageKey,
        vars: &TemplateVars,
        reseller_id: SellerId,
    ) -> Result<String, NotificationError> {
        let locale = self.locale_for(reseller_id);

        let mut context = Context::new();
        for (name, value) in vars.iter() {
            context.insert(name, value);
        }

        let rendered = self
            .engine
            .render(&format!("{locale}/{}", key.as_str()), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(rendered.trim_end().to_string())
    }
}
