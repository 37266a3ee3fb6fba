//! Built-in sign-on methods.
//!
//! Each adapter owns header/URL parsing and chain semantics only; credential
//! validation is delegated to a collaborator trait the embedding application
//! implements. Register them in chain order: OAuth2, Basic, Session,
//! ReverseProxy (see [`crate::sso::registry`]).

pub mod basic;
pub mod oauth2;
pub mod reverse_proxy;
pub mod session;

pub use basic::{Basic, CredentialVerifier};
pub use oauth2::{OAuth2, TokenIntrospector};
pub use reverse_proxy::ReverseProxy;
pub use session::SessionAuth;
