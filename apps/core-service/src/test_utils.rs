//! テストユーティリティ

mod return_notification_test_builder;

pub use return_notification_test_builder::{
    ReturnNotificationTestBuilder,
    ReturnNotificationTestSetup,
};
