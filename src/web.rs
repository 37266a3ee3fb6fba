/*
 * Responsibility
 * - response 側の collaborator trait (locale cookie / CSRF cookie)
 * - 実装はフレームワーク層が持つ。ここは契約のみ
 */
use axum::http::request::Parts;
use axum::http::HeaderMap;

/// Locale negotiation for a request plus the locale cookie write.
///
/// Negotiation internals (Accept-Language parsing, supported-locale
/// matching) live in the embedding application.
pub trait LocaleNegotiator: Send + Sync {
    /// Language tag negotiated for this request.
    fn negotiate(&self, req: &Parts) -> String;

    /// Session-scoped locale cookie on the response headers.
    fn set_locale_cookie(&self, resp: &mut HeaderMap, language: &str);
}

/// CSRF cookie invalidation hook.
pub trait CsrfProtector: Send + Sync {
    /// Drop the current CSRF cookie so the next render issues a fresh token.
    fn delete_cookie(&self, resp: &mut HeaderMap);
}
