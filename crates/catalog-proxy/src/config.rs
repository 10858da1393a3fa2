use serde::Deserialize;
use url::Url;

use crate::error::{ProxyError, Result};

/// Address the server binds to when none is configured.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Upstream request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable overriding [`ProxyConfig::upstream_url`].
pub const API_URL_ENV: &str = "CATALOG_SCAN_API_URL";

/// Environment variable overriding [`ProxyConfig::api_key`].
pub const API_KEY_ENV: &str = "CATALOG_SCAN_API_KEY";

/// Proxy settings, read from a `[proxy]` TOML table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProxyConfig {
    pub bind: String,
    pub upstream_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            upstream_url: String::new(),
            api_key: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ProxyConfig {
    /// Overlay non-empty values from [`API_URL_ENV`] and [`API_KEY_ENV`].
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_overrides(
            std::env::var(API_URL_ENV).ok(),
            std::env::var(API_KEY_ENV).ok(),
        )
    }

    fn with_overrides(mut self, url: Option<String>, key: Option<String>) -> Self {
        if let Some(url) = url.filter(|v| !v.trim().is_empty()) {
            self.upstream_url = url.trim().to_string();
        }
        if let Some(key) = key.filter(|v| !v.trim().is_empty()) {
            self.api_key = key.trim().to_string();
        }
        self
    }

    /// Parsed upstream URL. Only `http` and `https` are accepted.
    pub fn upstream(&self) -> Result<Url> {
        if self.upstream_url.trim().is_empty() {
            return Err(ProxyError::Config(format!(
                "no upstream URL configured (set [proxy] upstream_url or {API_URL_ENV})"
            )));
        }
        let url = Url::parse(self.upstream_url.trim())
            .map_err(|e| ProxyError::Config(format!("invalid upstream URL: {e}")))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ProxyError::Config(format!(
                "unsupported upstream scheme '{other}'"
            ))),
        }
    }
}
