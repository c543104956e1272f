//! # Core Service 設定
//!
//! 環境変数から返品通知サービスの設定を読み込む。
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|-----------|------|
//! | `NOTIFICATION_BACKEND` | `noop` | メール送信バックエンド（`smtp` / `ses` / `noop`） |
//! | `SMTP_HOST` | `localhost` | SMTP ホスト |
//! | `SMTP_PORT` | `1025` | SMTP ポート |
//! | `NOTIFICATION_FROM_ADDRESS` | なし | 販売者設定がない場合の送信元アドレス |
//! | `SMS_BACKEND` | `noop` | SMS 送信バックエンド（`http` / `noop`） |
//! | `SMS_GATEWAY_URL` | なし | SMS ゲートウェイの URL（`SMS_BACKEND=http` で必須） |
//! | `SMS_GATEWAY_TIMEOUT_SECS` | `10` | SMS ゲートウェイのタイムアウト秒数 |
//! | `DEFAULT_LOCALE` | `ru` | 販売者ごとの指定がない場合のロケール（`ru` / `en`） |
//! | `DIRECTORY_FILE` | なし | ID ストアとして読み込む JSON ファイル |

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;
use url::Url;

use crate::usecase::return_notification::Locale;

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 値が不正
    #[error("{name} の値が不正です（{value}）: {reason}")]
    InvalidValue {
        name:   &'static str,
        value:  String,
        reason: String,
    },

    /// 必須の値がない
    #[error("{name} が設定されていません")]
    Missing { name: &'static str },
}

/// メール送信バックエンド
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationBackend {
    /// Mailpit（開発）/ SMTP サーバー経由で送信
    Smtp,
    /// Amazon SES v2 経由で送信（本番）
    Ses,
    /// 送信しない（ログ出力のみ）
    #[default]
    Noop,
}

/// SMS 送信バックエンド
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SmsBackend {
    /// HTTP ゲートウェイ経由で送信
    Http,
    /// 送信しない（ログ出力のみ）
    #[default]
    Noop,
}

/// 返品通知サービスの設定
#[derive(Debug, Clone)]
pub struct ReturnServiceConfig {
    /// メール通知設定
    pub notification:   NotificationConfig,
    /// SMS 通知設定
    pub sms:            SmsConfig,
    /// デフォルトロケール
    pub default_locale: Locale,
    /// ID ストアとして読み込む JSON ファイル
    pub directory_file: Option<PathBuf>,
}

/// メール通知の設定
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub backend:      NotificationBackend,
    pub smtp_host:    String,
    pub smtp_port:    u16,
    /// 販売者設定がない場合の送信元アドレス
    pub from_address: Option<String>,
}

/// SMS 通知の設定
#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub backend:     SmsBackend,
    /// `backend = Http` の場合は必ず `Some`
    pub gateway_url: Option<Url>,
    pub timeout:     Duration,
}

impl ReturnServiceConfig {
    /// `.env` ファイル（存在する場合）を読み込んでから環境変数で設定を構築する
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 空文字列の値は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let sms_backend: SmsBackend = parse_or(&get, "SMS_BACKEND", SmsBackend::default())?;
        let gateway_url = get("SMS_GATEWAY_URL")
            .map(|value| {
                Url::parse(&value).map_err(|e| ConfigError::InvalidValue {
                    name:   "SMS_GATEWAY_URL",
                    value:  value.clone(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;
        if sms_backend == SmsBackend::Http && gateway_url.is_none() {
            return Err(ConfigError::Missing {
                name: "SMS_GATEWAY_URL",
            });
        }

        Ok(Self {
            notification:   NotificationConfig {
                backend:      parse_or(&get, "NOTIFICATION_BACKEND", NotificationBackend::default())?,
                smtp_host:    get("SMTP_HOST").unwrap_or_else(|| "localhost".to_string()),
                smtp_port:    parse_or(&get, "SMTP_PORT", 1025)?,
                from_address: get("NOTIFICATION_FROM_ADDRESS"),
            },
            sms:            SmsConfig {
                backend: sms_backend,
                gateway_url,
                timeout: Duration::from_secs(parse_or(&get, "SMS_GATEWAY_TIMEOUT_SECS", 10)?),
            },
            default_locale: parse_or(&get, "DEFAULT_LOCALE", Locale::default())?,
            directory_file: get("DIRECTORY_FILE").map(PathBuf::from),
        })
    }
}

fn parse_or<T>(
    get: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(name) {
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            name,
            reason: e.to_string(),
            value,
        }),
        None => Ok(default),
    }
}
