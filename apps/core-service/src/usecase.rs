//! # ユースケース層
//!
//! Core Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: コラボレータを `Arc<dyn Trait>` で外部から注入
//! - **段階の分離**: 検証・解決・構築・送信を個別のコンポーネントに分け、単体でテストする
//!
//! ## モジュール構成
//!
//! - `return_notification`: 返品クレームの通知

pub mod return_notification;

pub use return_notification::{
    ReturnNotificationDeps,
    ReturnNotificationUseCase,
    ReturnOperationRequest,
};
