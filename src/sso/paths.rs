//! Recognition of the two protocol-exempt URL shapes.
//!
//! Git clients and attachment downloads cannot set custom headers, so
//! schemes that accept a token in the URL are allowed only on these paths.
//! Both predicates are pure; nothing is persisted.

use axum::http::{Method, Uri};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Config;

static GIT_PATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^/[a-zA-Z0-9_.-]+/[a-zA-Z0-9_.-]+/(?:git-(?:upload|receive)-pack$|info/refs$|HEAD$|objects/)",
    )
    .unwrap()
});

static LFS_PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/[a-zA-Z0-9_.-]+/[a-zA-Z0-9_.-]+/info/lfs/").unwrap());

/// GET request for a stored attachment.
pub fn is_attachment_download(method: &Method, uri: &Uri) -> bool {
    *method == Method::GET && uri.path().starts_with("/attachments/")
}

/// Git smart-HTTP request (`/{owner}/{repo}/git-upload-pack`, `info/refs`,
/// `HEAD`, `objects/...`), or an LFS request when LFS serving is enabled.
pub fn is_git_or_lfs_path(config: &Config, uri: &Uri) -> bool {
    if GIT_PATH_RE.is_match(uri.path()) {
        return true;
    }
    config.lfs_start_server && LFS_PATH_RE.is_match(uri.path())
}
