//! # Core Service
//!
//! 返品通知操作を 1 回実行するコマンド。
//!
//! ## 役割
//!
//! 認証・認可済みの呼び出し元から渡されたリクエスト（JSON）を読み取り、
//! 従業員と顧客への通知を送信して結果（JSON）を標準出力に書き出す。
//!
//! ```text
//! ┌──────────────┐  JSON   ┌──────────────┐  メール  ┌──────────────┐
//! │  呼び出し元  │───────→│ Core Service │───────→│ SMTP / SES   │
//! └──────────────┘         └──────────────┘  SMS    │ SMS gateway  │
//!                                                   └──────────────┘
//! ```
//!
//! ## 使い方
//!
//! ```bash
//! # 標準入力からリクエストを読む
//! echo '{"resellerId": 7, "notificationType": 1, ...}' | returnflow-core-service
//!
//! # ファイルからリクエストを読む
//! returnflow-core-service request.json
//! ```
//!
//! 操作エラー時は RFC 9457 形式のエラーレスポンスを出力し、終了コード 1 で終了する。
//! 環境変数は [`returnflow_core_service::config`] を参照。

use std::io::Read;

use anyhow::Context;
use returnflow_core_service::{
    bootstrap,
    config::ReturnServiceConfig,
    usecase::ReturnOperationRequest,
};
use returnflow_shared::observability::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込んだうえで設定を構築
    let config = ReturnServiceConfig::load().context("設定の読み込みに失敗しました")?;

    // トレーシング初期化
    init_tracing(TracingConfig::from_env("core-service"));

    let directory = bootstrap::load_directory(config.directory_file.as_deref()).await?;
    let usecase = bootstrap::build_usecase(&config, directory).await?;

    let payload = match std::env::args().nth(1) {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("リクエストファイルの読み込みに失敗しました: {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("標準入力の読み込みに失敗しました")?;
            buf
        }
    };
    let request: ReturnOperationRequest =
        serde_json::from_str(&payload).context("リクエストの JSON が不正です")?;

    match usecase.do_operation(&request).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(e) => {
            println!("{}", serde_json::to_string_pretty(&e.to_error_response())?);
            std::process::exit(1);
        }
    }
}
