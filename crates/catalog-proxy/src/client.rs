//! Client for the upstream product-data API.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::ProxyConfig;
use crate::error::{ProxyError, Result};

const USER_AGENT_VALUE: &str = concat!("catalog-proxy/", env!("CARGO_PKG_VERSION"));

/// GTIN lookups against the configured upstream.
#[derive(Debug, Clone)]
pub struct ScanClient {
    client: reqwest::Client,
    upstream: Url,
    api_key: String,
}

impl ScanClient {
    pub fn new(config: &ProxyConfig) -> Result<Self> {
        let upstream = config.upstream()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| ProxyError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            upstream,
            api_key: config.api_key.clone(),
        })
    }

    /// URL queried for `gtin`: the upstream with `api_key` and `gtin`
    /// appended to any query it already has.
    pub fn lookup_url(&self, gtin: &str) -> Url {
        let mut url = self.upstream.clone();
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("gtin", gtin);
        url
    }

    /// Look up a GTIN and return the upstream JSON unchanged.
    pub async fn scan(&self, gtin: &str) -> Result<Value> {
        debug!(gtin, host = ?self.upstream.host_str(), "forwarding GTIN lookup");

        let response = self.client.get(self.lookup_url(gtin)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(gtin, status = status.as_u16(), "upstream lookup failed");
            return Err(ProxyError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ProxyError::InvalidResponse(e.to_string()))
    }
}
