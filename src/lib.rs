//! Ordered, pluggable sign-on resolution for incoming HTTP requests.
//!
//! A service that accepts several credential schemes at once (OAuth2 bearer
//! tokens, HTTP Basic, session cookies, reverse-proxy headers) registers each
//! scheme as a [`SingleSignOn`] method in a [`MethodRegistry`] and runs
//! [`resolve_identity`] once per request. Methods are tried in registration
//! order and the first one that yields an [`Identity`] wins; a request no
//! method resolves is anonymous, never an error.
//!
//! Credential validation itself (token introspection, password hashing, proxy
//! trust policy) is not implemented here. It is delegated to collaborator
//! traits the embedding application provides, along with the session store,
//! the identity store, and locale/CSRF cookie handling.

pub mod config;
mod error;
pub mod identity;
pub mod session;
pub mod sso;
pub mod web;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use identity::{Identity, IdentityStore, UserLookupError};
pub use session::{SessionError, SessionStore};
pub use sso::chain::resolve_identity;
pub use sso::registry::MethodRegistry;
pub use sso::signin::SignInHandler;
pub use sso::SingleSignOn;
pub use web::{CsrfProtector, LocaleNegotiator};
