/*
 * Responsibility
 * - per-request SessionStore collaborator trait (get/set/delete)
 * - チェーンが触るセッションキーの定数定義
 */
use async_trait::async_trait;
use serde_json::Value;

/// Session keys owned by the sign-on flow.
pub mod keys {
    /// Canonical signed-in marker. Downstream must treat a session without a
    /// readable numeric `uid` as unauthenticated, whatever else is present.
    pub const UID: &str = "uid";
    pub const UNAME: &str = "uname";

    /// Keys left behind by in-flight flows (OpenID linking, two-factor, U2F,
    /// account linking). All of them are purged on every successful sign-in
    /// so no half-finished flow leaks across logins.
    pub const TRANSIENT: [&str; 8] = [
        "openid_verified_uri",
        "openid_signin_remember",
        "openid_determined_email",
        "openid_determined_username",
        "twofaUid",
        "twofaRemember",
        "u2fChallenge",
        "linkAccount",
    ];
}

#[derive(Debug, thiserror::Error)]
#[error("session store failure: {0}")]
pub struct SessionError(#[from] pub anyhow::Error);

/// Key/value accessor over the session of one client.
///
/// The backend (cookie store, Redis, database) is the embedding
/// application's concern; deleting an absent key is not an error.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<Value>;

    async fn set(&self, key: &str, value: Value) -> Result<(), SessionError>;

    async fn delete(&self, key: &str) -> Result<(), SessionError>;
}
