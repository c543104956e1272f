//! # ログ出力の初期化
//!
//! 返品通知コマンドのトレーシングを初期化する。
//!
//! コマンドは操作結果の JSON を標準出力に書き出すため、ログはすべて
//! 標準エラー出力に流す。ログ収集基盤に取り込む場合は `LOG_FORMAT=json` とし、
//! チャネルごとの送信結果（`event.kind = "business_event"`）を 1 行 1 レコードで出力する。

/// ログ出力形式（`LOG_FORMAT`）
///
/// 未設定または不正な値は [`Pretty`](LogFormat::Pretty) として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 レコードの JSON（ログ収集基盤向け）
    Json,
    /// 端末で読む形式
    #[default]
    Pretty,
}

impl LogFormat {
    /// 不正な値は警告を出したうえで Pretty とする
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            other => {
                eprintln!("WARNING: unknown LOG_FORMAT={other:?}, falling back to pretty");
                Self::Pretty
            }
        }
    }

    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT") {
            Ok(val) => Self::parse(&val),
            Err(_) => Self::default(),
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// 初期化ログに出力するサービス名
    pub service_name: String,
    pub log_format:   LogFormat,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    /// ログ形式を `LOG_FORMAT` から読み取る
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }
}

/// `RUST_LOG` 未設定時のフィルタ
///
/// returnflow の各クレート（`returnflow_core_service` など）は debug まで出力する。
pub const DEFAULT_LOG_FILTER: &str = "info,returnflow=debug";

/// トレーシングを初期化する
///
/// ログは標準エラー出力に書き出す。`tracing_error::ErrorLayer` を登録するため、
/// `InfraError` は生成時点の SpanTrace を保持する。
#[cfg(feature = "observability")]
pub fn init_tracing(config: TracingConfig) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();

    tracing::debug!(
        service = %config.service_name,
        log_format = ?config.log_format,
        "トレーシングを初期化しました"
    );
}
