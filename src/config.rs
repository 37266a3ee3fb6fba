/*
 * Responsibility
 * - 環境変数や設定の読み込み (LFS 配信、ReverseProxy 認証など)
 * - 不足時はデフォルト値 (起動を止める必須項目はない)
 */

/// Deployment switches consulted by the resolution chain.
///
/// Everything here is optional with a safe default; `from_env` never fails.
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether LFS content is served at all. When off, the LFS URL namespace
    /// is not treated as a Git path and token-in-URL credentials are not
    /// accepted there.
    pub lfs_start_server: bool,

    /// Whether the reverse-proxy identity header is trusted. Leave off unless
    /// every network path to this service goes through the proxy.
    pub enable_reverse_proxy_auth: bool,

    /// Header the reverse proxy injects the authenticated username into.
    pub reverse_proxy_auth_header: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            lfs_start_server: env_bool("LFS_START_SERVER"),
            enable_reverse_proxy_auth: env_bool("ENABLE_REVERSE_PROXY_AUTH"),
            reverse_proxy_auth_header: std::env::var("REVERSE_PROXY_AUTH_HEADER")
                .unwrap_or_else(|_| "X-WEBAUTH-USER".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lfs_start_server: false,
            enable_reverse_proxy_auth: false,
            reverse_proxy_auth_header: "X-WEBAUTH-USER".to_string(),
        }
    }
}

fn env_bool(key: &str) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}
