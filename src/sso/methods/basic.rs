//! HTTP Basic sign-on.
//!
//! This adapter only parses the `Authorization: Basic` payload; checking the
//! credentials (password hashing, lockout policy) is the collaborator's job.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::identity::Identity;
use crate::session::SessionStore;
use crate::sso::SingleSignOn;

/// Credential validation collaborator. Bad credentials map to `None`; the
/// chain then falls through to the next method.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, username: &str, password: &str) -> Option<Identity>;
}

pub struct Basic {
    verifier: Arc<dyn CredentialVerifier>,
}

impl Basic {
    pub fn new(verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { verifier }
    }
}

fn basic_payload(req: &Parts) -> Option<&str> {
    let auth = req.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, payload) = auth.split_once(' ')?;
    scheme.eq_ignore_ascii_case("basic").then_some(payload.trim())
}

#[async_trait]
impl SingleSignOn for Basic {
    fn name(&self) -> &'static str {
        "basic"
    }

    async fn init(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn free(&self) -> anyhow::Result<()> {
        Ok(())
    }

    fn is_applicable(&self, req: &Parts) -> bool {
        basic_payload(req).is_some()
    }

    async fn resolve(
        &self,
        req: &Parts,
        _resp: &mut HeaderMap,
        _session: &dyn SessionStore,
    ) -> Option<Identity> {
        let payload = basic_payload(req)?;

        let decoded = match STANDARD.decode(payload) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::trace!(error = %err, "malformed basic auth payload");
                return None;
            }
        };
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;

        self.verifier.verify(username, password).await
    }
}
