//! Fakes shared by the unit tests: scripted sign-on methods plus in-memory
//! stand-ins for the session store, identity store and cookie collaborators.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, Method, Request};
use serde_json::Value;

use crate::identity::{Identity, IdentityStore, UserLookupError};
use crate::session::{SessionError, SessionStore};
use crate::sso::SingleSignOn;
use crate::web::{CsrfProtector, LocaleNegotiator};

pub(crate) const CSRF_CLEARED_COOKIE: &str = "_csrf=; Path=/; Max-Age=0";

/// Install a fmt subscriber for tests that exercise the swallow-and-log
/// paths, so the emitted error lines are visible under `RUST_LOG`. Safe to
/// call from every test; only the first call wins.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub(crate) fn identity(id: i64, name: &str, language: &str) -> Identity {
    Identity {
        id,
        name: name.to_string(),
        language: language.to_string(),
    }
}

pub(crate) fn request_parts(method: Method, uri: &str) -> Parts {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(())
        .unwrap()
        .into_parts()
        .0
}

pub(crate) fn set_cookie_values(resp: &HeaderMap) -> Vec<String> {
    resp.get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

#[derive(Default)]
pub(crate) struct FakeSessionStore {
    values: Mutex<HashMap<String, Value>>,
    deleted: Mutex<Vec<String>>,
    fail_set: Option<&'static str>,
}

impl FakeSessionStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_value(self, key: &str, value: Value) -> Self {
        self.values.lock().unwrap().insert(key.to_string(), value);
        self
    }

    /// Make `set` of exactly this key fail.
    pub(crate) fn failing_set_of(mut self, key: &'static str) -> Self {
        self.fail_set = Some(key);
        self
    }

    pub(crate) fn value(&self, key: &str) -> Option<Value> {
        self.values.lock().unwrap().get(key).cloned()
    }

    /// Every key a delete was attempted for, present in the store or not.
    pub(crate) fn deleted_keys(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionStore for FakeSessionStore {
    async fn get(&self, key: &str) -> Option<Value> {
        self.value(key)
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), SessionError> {
        if self.fail_set == Some(key) {
            return Err(SessionError(anyhow!("write refused for {key}")));
        }
        self.values.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), SessionError> {
        self.deleted.lock().unwrap().push(key.to_string());
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeIdentityStore {
    users: Vec<Identity>,
    lookup_error: bool,
    update_error: bool,
    pub(crate) language_updates: Arc<Mutex<Vec<(i64, String)>>>,
}

impl FakeIdentityStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_user(mut self, user: Identity) -> Self {
        self.users.push(user);
        self
    }

    /// Simulate an identity-store outage on lookups.
    pub(crate) fn failing_lookups(mut self) -> Self {
        self.lookup_error = true;
        self
    }

    /// Simulate a failed language-column persistence.
    pub(crate) fn failing_updates(mut self) -> Self {
        self.update_error = true;
        self
    }
}

#[async_trait]
impl IdentityStore for FakeIdentityStore {
    async fn user_by_id(&self, id: i64) -> Result<Identity, UserLookupError> {
        if self.lookup_error {
            return Err(UserLookupError::Store(anyhow!("identity store offline")));
        }
        self.users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(UserLookupError::NotFound)
    }

    async fn user_by_name(&self, name: &str) -> Result<Identity, UserLookupError> {
        if self.lookup_error {
            return Err(UserLookupError::Store(anyhow!("identity store offline")));
        }
        self.users
            .iter()
            .find(|u| u.name == name)
            .cloned()
            .ok_or(UserLookupError::NotFound)
    }

    async fn update_language(&self, id: i64, language: &str) -> anyhow::Result<()> {
        if self.update_error {
            return Err(anyhow!("identity store offline"));
        }
        self.language_updates
            .lock()
            .unwrap()
            .push((id, language.to_string()));
        Ok(())
    }
}

pub(crate) struct FakeLocale {
    negotiated: String,
}

impl FakeLocale {
    pub(crate) fn new(negotiated: &str) -> Self {
        Self {
            negotiated: negotiated.to_string(),
        }
    }
}

impl LocaleNegotiator for FakeLocale {
    fn negotiate(&self, _req: &Parts) -> String {
        self.negotiated.clone()
    }

    fn set_locale_cookie(&self, resp: &mut HeaderMap, language: &str) {
        let cookie = format!("lang={language}; Path=/");
        resp.append(header::SET_COOKIE, cookie.parse().unwrap());
    }
}

pub(crate) struct FakeCsrf;

impl CsrfProtector for FakeCsrf {
    fn delete_cookie(&self, resp: &mut HeaderMap) {
        resp.append(header::SET_COOKIE, CSRF_CLEARED_COOKIE.parse().unwrap());
    }
}

/// A sign-on method whose behavior is fixed up front, with call counters
/// observable after the method has been boxed into a registry.
pub(crate) struct ScriptedMethod {
    name: &'static str,
    applicable: bool,
    resolves_to: Option<Identity>,
    fail_init: bool,
    fail_free: bool,
    pub(crate) init_calls: Arc<AtomicUsize>,
    pub(crate) free_calls: Arc<AtomicUsize>,
    pub(crate) resolve_calls: Arc<AtomicUsize>,
}

impl ScriptedMethod {
    fn new(name: &'static str, applicable: bool, resolves_to: Option<Identity>) -> Self {
        Self {
            name,
            applicable,
            resolves_to,
            fail_init: false,
            fail_free: false,
            init_calls: Arc::new(AtomicUsize::new(0)),
            free_calls: Arc::new(AtomicUsize::new(0)),
            resolve_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Applicable and resolving the given identity.
    pub(crate) fn resolving(name: &'static str, user: Identity) -> Self {
        Self::new(name, true, Some(user))
    }

    /// Applicable but never resolving (validation failed internally).
    pub(crate) fn anonymous(name: &'static str) -> Self {
        Self::new(name, true, None)
    }

    /// Not applicable to any request.
    pub(crate) fn skipped(name: &'static str) -> Self {
        Self::new(name, false, None)
    }

    pub(crate) fn with_failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    pub(crate) fn with_failing_free(mut self) -> Self {
        self.fail_free = true;
        self
    }
}

#[async_trait]
impl SingleSignOn for ScriptedMethod {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn init(&self) -> anyhow::Result<()> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_init {
            return Err(anyhow!("init refused"));
        }
        Ok(())
    }

    async fn free(&self) -> anyhow::Result<()> {
        self.free_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_free {
            return Err(anyhow!("free refused"));
        }
        Ok(())
    }

    fn is_applicable(&self, _req: &Parts) -> bool {
        self.applicable
    }

    async fn resolve(
        &self,
        _req: &Parts,
        _resp: &mut HeaderMap,
        _session: &dyn SessionStore,
    ) -> Option<Identity> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        self.resolves_to.clone()
    }
}
