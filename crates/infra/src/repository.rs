//! # ID ストアのリポジトリ
//!
//! 販売者・取引先・従業員を ID で解決するルックアップのインターフェース。
//!
//! ## 設計方針
//!
//! - **読み取り専用**: 通知処理はエンティティを永続化しない
//! - **不在は `Ok(None)`**: 見つからないことはエラーではなく、ユースケース層で判定する
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod contractor_repository;
pub mod employee_repository;
pub mod seller_repository;

pub use contractor_repository::ContractorRepository;
pub use employee_repository::EmployeeRepository;
pub use seller_repository::SellerRepository;
