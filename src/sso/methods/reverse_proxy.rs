//! Reverse-proxy header sign-on.
//!
//! A perimeter proxy that authenticates users itself injects the username
//! into a configured header. This is a trust-the-network fallback and must
//! be registered last; which peers are allowed to set the header is the
//! deployment's trust policy, not this adapter's.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::config::Config;
use crate::identity::{Identity, IdentityStore, UserLookupError};
use crate::session::SessionStore;
use crate::sso::SingleSignOn;

pub struct ReverseProxy {
    users: Arc<dyn IdentityStore>,
    config: Arc<Config>,
}

impl ReverseProxy {
    pub fn new(users: Arc<dyn IdentityStore>, config: Arc<Config>) -> Self {
        Self { users, config }
    }

    fn proxied_username(&self, req: &Parts) -> Option<String> {
        let value = req
            .headers
            .get(self.config.reverse_proxy_auth_header.as_str())?
            .to_str()
            .ok()?
            .trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}

#[async_trait]
impl SingleSignOn for ReverseProxy {
    fn name(&self) -> &'static str {
        "reverse-proxy"
    }

    async fn init(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn free(&self) -> anyhow::Result<()> {
        Ok(())
    }

    fn is_applicable(&self, req: &Parts) -> bool {
        self.config.enable_reverse_proxy_auth && self.proxied_username(req).is_some()
    }

    async fn resolve(
        &self,
        req: &Parts,
        _resp: &mut HeaderMap,
        _session: &dyn SessionStore,
    ) -> Option<Identity> {
        let username = self.proxied_username(req)?;

        match self.users.user_by_name(&username).await {
            Ok(user) => Some(user),
            Err(UserLookupError::NotFound) => {
                tracing::trace!(user = %username, "proxied user does not exist");
                None
            }
            Err(err) => {
                tracing::error!(user = %username, error = %err, "proxied user lookup failed");
                None
            }
        }
    }
}
