//! # ReturnFlow インフラ層
//!
//! 返品通知が依存する外部コラボレータのインターフェースと実装を提供する。
//!
//! ## 設計方針
//!
//! ユースケース層はここで定義したトレイト（`Arc<dyn Trait>`）にのみ依存する。
//! 外部システムの詳細をカプセル化し、テストではインメモリのモックに差し替える。
//!
//! ## 責務
//!
//! - **ID ストア**: 販売者・取引先・従業員のルックアップ（[`repository`]）
//!   と JSON ドキュメントによるインメモリ実装（[`directory`]）
//! - **ステータス名**: 返品ステータスコードの名称解決（[`status_catalog`]）
//! - **販売者設定**: 送信元アドレス、通知先従業員の権限設定（[`settings`]）
//! - **メール送信**: SMTP / SES / Noop（[`notification`]）
//! - **SMS 送信**: HTTP ゲートウェイ / Noop（[`sms`]）
//!
//! ## 依存関係
//!
//! ```text
//! core-service → infra → domain
//! ```

pub mod directory;
pub mod error;
pub mod notification;
pub mod repository;
pub mod settings;
pub mod sms;
pub mod status_catalog;

// テスト用モック（test-utils feature で公開）
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::{InfraError, InfraErrorKind};
