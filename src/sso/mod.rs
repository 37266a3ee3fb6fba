//! The sign-on chain: the [`SingleSignOn`] contract, the ordered
//! [`registry::MethodRegistry`], the per-request resolver, path
//! classification for protocol-exempt URLs, and the sign-in session writer.

pub mod chain;
pub mod methods;
pub mod paths;
pub mod registry;
pub mod session_user;
pub mod signin;

use async_trait::async_trait;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::identity::Identity;
use crate::session::SessionStore;

/// One strategy for turning request credentials into an [`Identity`].
///
/// Implementations own their validation state; the chain only orders and
/// dispatches them. A method's internal validation failure (bad token,
/// malformed header) is reported as `None` from [`resolve`], never as an
/// error: the chain must be able to move on to the next method.
///
/// [`resolve`]: SingleSignOn::resolve
#[async_trait]
pub trait SingleSignOn: Send + Sync {
    /// Stable identifier used to label log lines for this method.
    fn name(&self) -> &'static str;

    /// Called exactly once at application start to allocate resources.
    async fn init(&self) -> anyhow::Result<()>;

    /// Called exactly once at application shutdown.
    async fn free(&self) -> anyhow::Result<()>;

    /// Cheap pre-check; `resolve` is only invoked when this returns true.
    fn is_applicable(&self, req: &Parts) -> bool;

    /// Try to resolve an identity from this request's credentials.
    async fn resolve(
        &self,
        req: &Parts,
        resp: &mut HeaderMap,
        session: &dyn SessionStore,
    ) -> Option<Identity>;
}
