/// 整数ベースの ID 型を定義する宣言型マクロ
///
/// 以下のボイラープレートを一括生成する:
/// - Newtype 構造体（`i64` をラップ）
/// - `derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)`
/// - `new()`: 生の値から作成
/// - `as_i64()`: 内部値の取得
/// - `From<i64>` impl
///
/// 外部の ID ストアが発番した値をそのまま扱うため、生成時の検証は行わない。
/// 0 や負数は「該当なし」としてルックアップで解決される。
///
/// # 使用例
///
/// ```rust
/// use returnflow_domain::seller::SellerId;
///
/// let id = SellerId::new(12);
/// assert_eq!(id.as_i64(), 12);
/// assert_eq!(id.to_string(), "12");
/// ```
macro_rules! define_int_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[display("{_0}")]
        #[serde(transparent)]
        $vis struct $Name(i64);

        impl $Name {
            /// 生の整数値から ID を作成する
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// 内部の整数値を取得する
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $Name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}
