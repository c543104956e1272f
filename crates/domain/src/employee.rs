//! # 従業員
//!
//! 返品クレームに記録される社内の担当者。
//! クレームの起票者（creator）と査定者（expert）の 2 役で登場する。

use serde::{Deserialize, Serialize};

define_int_id! {
    /// 従業員 ID
    pub struct EmployeeId;
}

/// 従業員エンティティ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    id:        EmployeeId,
    full_name: String,
}

impl Employee {
    pub fn new(id: EmployeeId, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
        }
    }

    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }
}
