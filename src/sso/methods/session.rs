//! Session-cookie sign-on: the fast path for browser users who already
//! signed in. Must come after OAuth2 and Basic so explicit credentials beat
//! a stale cookie.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::identity::{Identity, IdentityStore};
use crate::session::SessionStore;
use crate::sso::session_user::session_user;
use crate::sso::SingleSignOn;

pub struct SessionAuth {
    users: Arc<dyn IdentityStore>,
}

impl SessionAuth {
    pub fn new(users: Arc<dyn IdentityStore>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl SingleSignOn for SessionAuth {
    fn name(&self) -> &'static str {
        "session"
    }

    async fn init(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn free(&self) -> anyhow::Result<()> {
        Ok(())
    }

    fn is_applicable(&self, _req: &Parts) -> bool {
        true
    }

    async fn resolve(
        &self,
        _req: &Parts,
        _resp: &mut HeaderMap,
        session: &dyn SessionStore,
    ) -> Option<Identity> {
        session_user(self.users.as_ref(), session).await
    }
}
