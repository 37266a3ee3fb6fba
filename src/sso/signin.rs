//! Session establishment after a successful interactive sign-in.

use std::sync::Arc;

use axum::http::request::Parts;
use axum::http::HeaderMap;
use serde_json::json;

use crate::error::log_and_continue;
use crate::identity::{Identity, IdentityStore};
use crate::session::{keys, SessionStore};
use crate::web::{CsrfProtector, LocaleNegotiator};

/// Writes the canonical session state for a newly signed-in user.
///
/// Invoked once per resolution that establishes a *new* interactive session
/// (typically after Basic auth or a login form), not on every resolved
/// request.
pub struct SignInHandler {
    users: Arc<dyn IdentityStore>,
    locale: Arc<dyn LocaleNegotiator>,
    csrf: Arc<dyn CsrfProtector>,
}

impl SignInHandler {
    pub fn new(
        users: Arc<dyn IdentityStore>,
        locale: Arc<dyn LocaleNegotiator>,
        csrf: Arc<dyn CsrfProtector>,
    ) -> Self {
        Self {
            users,
            locale,
            csrf,
        }
    }

    /// Clear stale cross-flow session keys and store the new sign-in.
    ///
    /// Ordering matters at the tail: if the user has no stored language, the
    /// negotiated one is persisted first, and a persistence failure aborts
    /// the locale-cookie and CSRF-invalidation steps. Everything before that
    /// point is best-effort; see [`log_and_continue`].
    pub async fn handle_sign_in(
        &self,
        req: &Parts,
        resp: &mut HeaderMap,
        session: &dyn SessionStore,
        user: &mut Identity,
    ) {
        // Deleting a key that was never set is not an error.
        for key in keys::TRANSIENT {
            log_and_continue("delete transient session key", session.delete(key).await);
        }

        // Partial success is tolerated: a session with `uname` but no `uid`
        // reads as unauthenticated on the next request, since `uid` is the
        // canonical check.
        log_and_continue("set session uid", session.set(keys::UID, json!(user.id)).await);
        log_and_continue(
            "set session uname",
            session.set(keys::UNAME, json!(user.name)).await,
        );

        // A user without a stored locale adopts the one negotiated for this
        // request, persisted so later sessions agree.
        if user.language.is_empty() {
            user.language = self.locale.negotiate(req);
            if let Err(err) = self.users.update_language(user.id, &user.language).await {
                tracing::error!(
                    user_id = user.id,
                    language = %user.language,
                    error = %err,
                    "could not persist user language"
                );
                return;
            }
        }

        self.locale.set_locale_cookie(resp, &user.language);

        // Whatever CSRF token exists now predates this login; drop the
        // cookie and let the next render generate a fresh one.
        self.csrf.delete_cookie(resp);
    }
}
