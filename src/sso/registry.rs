//! Ordered collection of sign-on methods with lifecycle management.
//!
//! Registration order is a security invariant, not a convenience: the chain
//! tries methods front to back and the first hit wins. When the four
//! built-in schemes are registered the required relative order is
//!
//! 1. OAuth2 — must run before anything that consults the session's stored
//!    `uid`, because a request may legitimately authenticate as a different
//!    identity than whatever the session has cached;
//! 2. Basic — explicit credentials beat a stale cookie;
//! 3. Session — the fast path for already-signed-in browser users;
//! 4. ReverseProxy — a trust-the-perimeter fallback that must never override
//!    a credential-bearing scheme.
//!
//! New schemes may be inserted, but this relative order has to survive;
//! reordering silently changes authentication precedence.

use crate::sso::SingleSignOn;

/// Registry of sign-on methods, tried in registration order.
///
/// Build and populate it during startup, call [`init`](Self::init) once, and
/// share it immutably afterwards. Registration takes `&mut self`, so the
/// borrow checker enforces that no registration happens while requests are
/// resolving against the registry.
#[derive(Default)]
pub struct MethodRegistry {
    methods: Vec<Box<dyn SingleSignOn>>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self {
            methods: Vec::new(),
        }
    }

    /// Current registrations, in order.
    pub fn methods(&self) -> &[Box<dyn SingleSignOn>] {
        &self.methods
    }

    /// Append a method to the end of the chain.
    ///
    /// Caveat: this does not call `init` on the new method. A method
    /// registered after [`init`](Self::init) has already run is consulted
    /// for resolution but is never initialized; the caller owns that.
    pub fn register(&mut self, method: Box<dyn SingleSignOn>) {
        self.methods.push(method);
    }

    /// Initialize every registered method, in order.
    ///
    /// A failing method is logged and skipped so one misconfigured plugin
    /// cannot disable the rest of the chain.
    pub async fn init(&self) {
        for method in &self.methods {
            if let Err(err) = method.init().await {
                tracing::error!(
                    method = method.name(),
                    error = %err,
                    "could not initialize sign-on method"
                );
            }
        }
    }

    /// Release every registered method's resources, in order.
    ///
    /// Same non-fatal-per-method policy as [`init`](Self::init).
    pub async fn free(&self) {
        for method in &self.methods {
            if let Err(err) = method.free().await {
                tracing::error!(
                    method = method.name(),
                    error = %err,
                    "could not free sign-on method"
                );
            }
        }
    }
}
