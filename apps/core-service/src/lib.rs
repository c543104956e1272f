//! # Core Service ライブラリ
//!
//! 返品通知ユースケースと、その設定・組み立てを公開する。
//! テスト用に内部モジュールへのアクセスを提供する。

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod usecase;

// テストユーティリティ（内部実装、ドキュメントからは隠す）
#[cfg(feature = "test-utils")]
#[doc(hidden)]
pub mod test_utils;
