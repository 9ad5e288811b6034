//! Error reporting mode
//!
//! Decides whether internal error details (the source chain) may be
//! exposed in HTTP responses. Set once at startup; read-only afterwards.

use std::sync::OnceLock;

static PRODUCTION: OnceLock<bool> = OnceLock::new();

/// 本番モードを設定 (起動時に一度だけ)
///
/// 2 回目以降の呼び出しは無視され、`false` を返します。
pub fn set_production(production: bool) -> bool {
    PRODUCTION.set(production).is_ok()
}

/// 本番モードかどうか
///
/// 未設定の場合はリリースビルドを本番とみなします。
pub fn is_production() -> bool {
    *PRODUCTION.get_or_init(|| !cfg!(debug_assertions))
}

/// 内部エラーの詳細をレスポンスに含めてよいか
#[inline]
pub fn expose_details() -> bool {
    !is_production()
}
