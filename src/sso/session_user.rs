//! Identity lookup from the session's stored `uid`.

use crate::identity::{Identity, IdentityStore, UserLookupError};
use crate::session::{keys, SessionStore};

/// Resolve the user the session's `uid` key refers to.
///
/// Fail-closed on every ambiguous condition: missing `uid`, a `uid` that is
/// not a numeric id (corrupted session), a `uid` referencing a deleted
/// account, and an identity-store failure all yield `None`. Only the store
/// failure is logged; a vanished account is an expected outcome.
pub async fn session_user(
    users: &dyn IdentityStore,
    session: &dyn SessionStore,
) -> Option<Identity> {
    let uid = session.get(keys::UID).await?;
    tracing::trace!(uid = %uid, "session authorization: found uid");

    let id = uid.as_i64()?;

    match users.user_by_id(id).await {
        Ok(user) => {
            tracing::trace!(
                user_id = user.id,
                user = %user.name,
                "session authorization: signed-in user"
            );
            Some(user)
        }
        Err(UserLookupError::NotFound) => None,
        Err(err) => {
            tracing::error!(user_id = id, error = %err, "user lookup by session uid failed");
            None
        }
    }
}
