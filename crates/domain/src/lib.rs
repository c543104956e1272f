//! # ReturnFlow ドメイン層
//!
//! 返品クレーム（goods return complaint）通知のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 販売者（Seller）、取引先（Contractor）、従業員（Employee）
//! - **値オブジェクト**: 整数 ID の Newtype、返品ステータス、テンプレートデータ
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! core-service → infra → domain
//! ```
//!
//! ドメイン層は外部システム（メール送信、SMS ゲートウェイ、ID ストア）に
//! 一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`seller`] / [`contractor`] / [`employee`] - 通知に登場する主体
//! - [`return_status`] - 返品ステータスコードとステータス遷移
//! - [`template`] - メッセージテンプレートに渡すデータ
//! - [`notification`] - 通知イベント、メッセージ、送信結果
//!
//! ## 使用例
//!
//! ```rust
//! use returnflow_domain::{
//!     contractor::{Contractor, ContractorId, ContractorType},
//!     seller::SellerId,
//! };
//!
//! let seller_id = SellerId::new(7);
//! let client = Contractor::new(
//!     ContractorId::new(42),
//!     ContractorType::Customer,
//!     seller_id,
//!     "Ivan",
//! );
//!
//! assert!(client.is_customer_of(seller_id));
//! ```

#[macro_use]
mod macros;

pub mod contractor;
pub mod employee;
pub mod error;
pub mod notification;
pub mod return_status;
pub mod seller;
pub mod template;

pub use error::DomainError;
