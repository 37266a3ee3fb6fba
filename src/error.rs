/*
 * Responsibility
 * - the logged-and-continue policy for best-effort operations
 * - keeps the swallow-and-log contract in one place so it stays auditable
 */
use std::fmt::Display;

/// Log a failed best-effort operation and carry on.
///
/// Several sign-in steps are deliberately non-fatal (clearing stale session
/// keys, writing `uid`/`uname`): a failure must not abort the remaining
/// steps. Route all of those through here instead of ad hoc logging so the
/// non-fatal set stays visible at the call sites.
pub(crate) fn log_and_continue<T, E: Display>(op: &'static str, res: Result<T, E>) {
    if let Err(err) = res {
        tracing::error!(op, error = %err, "best-effort operation failed; continuing");
    }
}
