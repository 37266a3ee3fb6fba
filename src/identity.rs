/*
 * Responsibility
 * - 解決済みユーザー (Identity) の型定義
 * - IdentityStore collaborator trait (lookup / language 永続化)
 */
use async_trait::async_trait;

/// A user reference produced by exactly one sign-on method per request.
///
/// The chain never mutates a resolved identity except for `language`, which
/// the sign-in writer sets once when the stored preference is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub name: String,
    /// Stored locale preference; empty until first sign-in negotiates one.
    pub language: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UserLookupError {
    /// Expected outcome (e.g. a session referencing a deleted account);
    /// callers treat it as "no identity" without logging.
    #[error("user does not exist")]
    NotFound,

    /// Infrastructure failure. Callers still yield no identity (fail-closed)
    /// but this variant is worth a log line.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Lookup side of user persistence. CRUD on user records lives elsewhere;
/// the chain only reads users and persists a single column (`language`).
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn user_by_id(&self, id: i64) -> Result<Identity, UserLookupError>;

    async fn user_by_name(&self, name: &str) -> Result<Identity, UserLookupError>;

    /// Persist only the language column, leaving other columns untouched.
    async fn update_language(&self, id: i64, language: &str) -> anyhow::Result<()>;
}
