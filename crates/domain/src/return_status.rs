//! # 返品ステータス
//!
//! 返品明細のステータスコードと、ステータス変更通知で使う遷移（差分）を定義する。
//!
//! ## 組み込みステータス
//!
//! | コード | 名称 |
//! |-------|------|
//! | 0 | Completed |
//! | 1 | Pending |
//! | 2 | Rejected |
//!
//! コードから名称への変換は `StatusCatalog`（infra）の責務。

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// 返品ステータスコード
///
/// コード 0 は「未指定」と区別できないため、遷移先としては扱わない
/// （[`StatusDifferences::target`]）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
#[serde(transparent)]
pub struct ReturnStatus(i64);

impl ReturnStatus {
    pub const COMPLETED: Self = Self(0);
    pub const PENDING: Self = Self(1);
    pub const REJECTED: Self = Self(2);

    pub fn new(code: i64) -> Self {
        Self(code)
    }

    pub fn code(&self) -> i64 {
        self.0
    }

    /// 値が設定されているか（0 以外）
    pub fn is_set(&self) -> bool {
        self.0 != 0
    }
}

/// ステータス遷移（差分）
///
/// リクエストの `differences: {from, to}` に対応する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDifferences {
    pub from: ReturnStatus,
    pub to:   ReturnStatus,
}

impl StatusDifferences {
    pub fn new(from: ReturnStatus, to: ReturnStatus) -> Self {
        Self { from, to }
    }

    /// 顧客通知の対象となる遷移先ステータス
    ///
    /// 遷移先が未設定（0）の場合は `None`。
    pub fn target(&self) -> Option<ReturnStatus> {
        self.to.is_set().then_some(self.to)
    }
}
