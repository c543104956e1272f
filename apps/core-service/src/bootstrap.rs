//! # 依存コンポーネントの組み立て
//!
//! 設定からコラボレータの実装を選択し、[`ReturnNotificationUseCase`] を構築する。

use std::{path::Path, sync::Arc};

use returnflow_domain::{notification::NotificationError, seller::SellerId};
use returnflow_infra::{
    InfraError,
    directory::JsonDirectory,
    notification::{
        NoopNotificationSender,
        NotificationSender,
        SesNotificationSender,
        SmtpNotificationSender,
    },
    sms::{HttpSmsNotifier, NoopSmsNotifier, SmsNotifier},
    status_catalog::StaticStatusCatalog,
};
use thiserror::Error;

use crate::{
    config::{NotificationBackend, NotificationConfig, ReturnServiceConfig, SmsBackend, SmsConfig},
    usecase::return_notification::{
        Locale,
        Localizer,
        ReturnNotificationDeps,
        ReturnNotificationUseCase,
        TeraLocalizer,
    },
};

/// 組み立て時のエラー
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("通知コンポーネントの初期化に失敗: {0}")]
    Notification(#[from] NotificationError),

    #[error("ディレクトリの初期化に失敗: {0}")]
    Directory(#[from] InfraError),

    #[error("ディレクトリファイルの読み込みに失敗（{path}）: {source}")]
    DirectoryFile {
        path:   String,
        source: std::io::Error,
    },

    #[error("販売者 {reseller_id} のロケールが不正です: {value}")]
    InvalidLocale { reseller_id: SellerId, value: String },
}

/// メール送信バックエンドを構築する
pub async fn build_notification_sender(config: &NotificationConfig) -> Arc<dyn NotificationSender> {
    match config.backend {
        NotificationBackend::Smtp => {
            tracing::info!(
                host = %config.smtp_host,
                port = config.smtp_port,
                "SMTP 通知送信を使用します"
            );
            Arc::new(SmtpNotificationSender::new(&config.smtp_host, config.smtp_port))
        }
        NotificationBackend::Ses => {
            tracing::info!("SES 通知送信を使用します");
            Arc::new(SesNotificationSender::from_env().await)
        }
        NotificationBackend::Noop => {
            tracing::info!("通知送信は無効です（noop）");
            Arc::new(NoopNotificationSender)
        }
    }
}

/// SMS 送信バックエンドを構築する
pub fn build_sms_notifier(config: &SmsConfig) -> Result<Arc<dyn SmsNotifier>, BootstrapError> {
    match (config.backend, &config.gateway_url) {
        (SmsBackend::Http, Some(url)) => {
            let notifier = HttpSmsNotifier::new(url.clone(), config.timeout)?;
            tracing::info!(endpoint = %notifier.endpoint(), "HTTP SMS ゲートウェイを使用します");
            Ok(Arc::new(notifier))
        }
        (SmsBackend::Http, None) => Err(NotificationError::SendFailed(
            "SMS_GATEWAY_URL が設定されていません".to_string(),
        )
        .into()),
        (SmsBackend::Noop, _) => {
            tracing::info!("SMS 送信は無効です（noop）");
            Ok(Arc::new(NoopSmsNotifier))
        }
    }
}

/// ディレクトリを読み込む
///
/// ファイルが指定されていなければ空のディレクトリを返す。
pub async fn load_directory(path: Option<&Path>) -> Result<JsonDirectory, BootstrapError> {
    let Some(path) = path else {
        tracing::warn!("DIRECTORY_FILE が未設定のため、空のディレクトリを使用します");
        return Ok(JsonDirectory::default());
    };

    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| BootstrapError::DirectoryFile {
            path: path.display().to_string(),
            source,
        })?;

    Ok(JsonDirectory::from_json(&json)?)
}

/// ローカライザーを構築する
///
/// ディレクトリの販売者ごとのロケール指定を上書きとして登録する。
pub fn build_localizer(
    default_locale: Locale,
    directory: &JsonDirectory,
) -> Result<TeraLocalizer, BootstrapError> {
    directory.reseller_locales().try_fold(
        TeraLocalizer::new(default_locale)?,
        |localizer, (reseller_id, value)| {
            let locale = value
                .parse::<Locale>()
                .map_err(|_| BootstrapError::InvalidLocale {
                    reseller_id,
                    value: value.to_string(),
                })?;
            Ok(localizer.with_reseller_locale(reseller_id, locale))
        },
    )
}

/// 設定とディレクトリからユースケースを構築する
pub async fn build_usecase(
    config: &ReturnServiceConfig,
    directory: JsonDirectory,
) -> Result<ReturnNotificationUseCase, BootstrapError> {
    let localizer: Arc<dyn Localizer> =
        Arc::new(build_localizer(config.default_locale, &directory)?);
    let sender = build_notification_sender(&config.notification).await;
    let sms_notifier = build_sms_notifier(&config.sms)?;

    let reseller_settings =
        Arc::new(directory.reseller_settings(config.notification.from_address.clone()));
    let permissions = Arc::new(directory.permission_directory());
    let directory = Arc::new(directory);

    Ok(ReturnNotificationUseCase::new(ReturnNotificationDeps {
        seller_repo: directory.clone(),
        contractor_repo: directory.clone(),
        employee_repo: directory,
        status_catalog: Arc::new(StaticStatusCatalog::default()),
        localizer,
        reseller_settings,
        permissions,
        sender,
        sms_notifier,
    }))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use returnflow_domain::{notification::MessageKey, template::TemplateVars};
    use url::Url;

    use super::*;

    fn noop_config() -> ReturnServiceConfig {
        ReturnServiceConfig::from_lookup(|_| None).unwrap()
    }

    #[test]
    fn noopのsms設定で構築できる() {
        let config = SmsConfig {
            backend:     SmsBackend::Noop,
            gateway_url: None,
            timeout:     Duration::from_secs(1),
        };

        assert!(build_sms_notifier(&config).is_ok());
    }

    #[test]
    fn httpのsms設定で構築できる() {
        let config = SmsConfig {
            backend:     SmsBackend::Http,
            gateway_url: Some(Url::parse("http://localhost:9000/sms").unwrap()),
            timeout:     Duration::from_secs(1),
        };

        assert!(build_sms_notifier(&config).is_ok());
    }

    #[test]
    fn urlのないhttp設定はエラーになる() {
        let config = SmsConfig {
            backend:     SmsBackend::Http,
            gateway_url: None,
            timeout:     Duration::from_secs(1),
        };

        assert!(matches!(
            build_sms_notifier(&config),
            Err(BootstrapError::Notification(_))
        ));
    }

    #[tokio::test]
    async fn ファイル未指定なら空のディレクトリを使う() {
        let directory = load_directory(None).await;

        assert!(directory.is_ok());
    }

    #[tokio::test]
    async fn 存在しないファイルはdirectory_fileエラーになる() {
        let result = load_directory(Some(Path::new("/nonexistent/directory.json"))).await;

        assert!(matches!(result, Err(BootstrapError::DirectoryFile { .. })));
    }

    #[tokio::test]
    async fn デフォルト設定でユースケースを構築できる() {
        let mut config = noop_config();
        config.default_locale = Locale::En;

        let usecase = build_usecase(&config, JsonDirectory::default()).await;

        assert!(usecase.is_ok());
    }

    #[test]
    fn 販売者ごとのロケールで文言を生成する() {
        let directory = JsonDirectory::from_json(
            r#"{"sellers": [
                { "id": 7, "name": "Shop", "locale": "en" },
                { "id": 8, "name": "Magazin", "locale": "ru" },
                { "id": 9, "name": "Default" }
            ]}"#,
        )
        .unwrap();

        let localizer = build_localizer(Locale::Ru, &directory).unwrap();
        let render = |id: i64| {
            localizer
                .render(MessageKey::NewPositionAdded, &TemplateVars::new(), SellerId::new(id))
                .unwrap()
        };

        assert_eq!(render(7), "New position added");
        assert_eq!(render(8), "Добавлена новая позиция");
        assert_eq!(render(9), "Добавлена новая позиция");
    }

    #[tokio::test]
    async fn 不正なロケール指定はinvalid_localeエラーになる() {
        let directory = JsonDirectory::from_json(
            r#"{"sellers": [{ "id": 7, "name": "Shop", "locale": "de" }]}"#,
        )
        .unwrap();

        let result = build_usecase(&noop_config(), directory).await;

        assert!(matches!(
            result,
            Err(BootstrapError::InvalidLocale { ref value, .. }) if value == "de"
        ));
    }
}
