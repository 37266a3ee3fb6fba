//! Bearer-token sign-on.
//!
//! The token normally travels in the `Authorization` header (`Bearer <t>` or
//! `token <t>`). Git and LFS clients, and attachment downloads driven by
//! `git lfs`-style tooling, cannot set custom headers, so on exactly those
//! paths the `access_token`/`token` query parameter is accepted as well.
//! Accepting a token in the URL anywhere else would leak credentials into
//! logs and referrers, which is why the path classifier gates it.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};

use crate::config::Config;
use crate::identity::{Identity, IdentityStore, UserLookupError};
use crate::session::SessionStore;
use crate::sso::paths::{is_attachment_download, is_git_or_lfs_path};
use crate::sso::SingleSignOn;

/// Token validation collaborator: maps a presented token to the user id it
/// was issued for. Introspection internals (expiry, scopes, signature) live
/// behind this trait; a token that fails validation maps to `None`.
#[async_trait]
pub trait TokenIntrospector: Send + Sync {
    async fn user_id_for_token(&self, token: &str) -> Option<i64>;
}

/// Must be the first method in the chain: it deliberately ignores the
/// session's stored `uid`, because a request carrying a token may
/// legitimately authenticate as someone other than the cached session user.
pub struct OAuth2 {
    introspector: Arc<dyn TokenIntrospector>,
    users: Arc<dyn IdentityStore>,
    config: Arc<Config>,
}

impl OAuth2 {
    pub fn new(
        introspector: Arc<dyn TokenIntrospector>,
        users: Arc<dyn IdentityStore>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            introspector,
            users,
            config,
        }
    }

    fn token_from_request(&self, req: &Parts) -> Option<String> {
        // Token-in-URL only on the protocol-exempt paths.
        if is_git_or_lfs_path(&self.config, &req.uri)
            || is_attachment_download(&req.method, &req.uri)
        {
            if let Some(token) = token_from_query(req.uri.query()) {
                return Some(token);
            }
        }

        let auth = req.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        let (scheme, token) = auth.split_once(' ')?;
        if scheme.eq_ignore_ascii_case("bearer") || scheme.eq_ignore_ascii_case("token") {
            let token = token.trim();
            (!token.is_empty()).then(|| token.to_string())
        } else {
            None
        }
    }
}

fn token_from_query(query: Option<&str>) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "access_token" || key == "token")
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl SingleSignOn for OAuth2 {
    fn name(&self) -> &'static str {
        "oauth2"
    }

    async fn init(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn free(&self) -> anyhow::Result<()> {
        Ok(())
    }

    fn is_applicable(&self, req: &Parts) -> bool {
        self.token_from_request(req).is_some()
    }

    async fn resolve(
        &self,
        req: &Parts,
        _resp: &mut HeaderMap,
        _session: &dyn SessionStore,
    ) -> Option<Identity> {
        let token = self.token_from_request(req)?;
        let user_id = self.introspector.user_id_for_token(&token).await?;

        match self.users.user_by_id(user_id).await {
            Ok(user) => Some(user),
            Err(UserLookupError::NotFound) => None,
            Err(err) => {
                tracing::error!(user_id, error = %err, "token resolved to an unreadable user");
                None
            }
        }
    }
}
