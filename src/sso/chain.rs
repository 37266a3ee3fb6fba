//! Per-request iteration over the method registry.

use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::identity::Identity;
use crate::session::SessionStore;
use crate::sso::registry::MethodRegistry;

/// Run the chain for one request: try each registered method in order and
/// return the first identity resolved.
///
/// At most one identity is produced per request; once a method resolves,
/// later methods are never consulted. A method that is not applicable, or
/// that fails its own validation internally, is simply skipped. `None` means
/// the caller should treat the request as anonymous; this function never
/// produces an error response of its own.
pub async fn resolve_identity(
    registry: &MethodRegistry,
    req: &Parts,
    resp: &mut HeaderMap,
    session: &dyn SessionStore,
) -> Option<Identity> {
    for method in registry.methods() {
        if !method.is_applicable(req) {
            continue;
        }
        if let Some(identity) = method.resolve(req, resp, session).await {
            tracing::trace!(
                method = method.name(),
                user_id = identity.id,
                "request authenticated"
            );
            return Some(identity);
        }
    }
    None
}
