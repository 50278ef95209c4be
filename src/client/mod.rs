//! HTTP client for the NZBN registry gateway.
//!
//! One [`NzbnClient`] is built at startup and shared by every invocation.
//! The underlying `reqwest::Client` only keeps a connection pool, so
//! overlapping calls do not interfere with each other.
//!
//! Each call issues exactly one `GET {base}/entities/{nzbn}` with the
//! subscription key and `Accept: application/json` headers. Nothing is
//! retried.

mod error;

pub use error::{FetchError, FetchResult};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::nzbn::Nzbn;

/// Header carrying the registry gateway subscription key.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Client for the registry gateway.
#[derive(Debug, Clone)]
pub struct NzbnClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl NzbnClient {
    /// Build a client from the API configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Configuration`] if the subscription key is not a
    /// valid header value or the TLS backend cannot be initialised.
    pub fn new(config: &ApiConfig) -> FetchResult<Self> {
        let mut headers = HeaderMap::new();

        let mut key = HeaderValue::from_str(&config.subscription_key).map_err(|_| {
            FetchError::Configuration(
                "subscription key contains characters not allowed in a header".to_string(),
            )
        })?;
        key.set_sensitive(true);
        headers.insert(SUBSCRIPTION_KEY_HEADER, key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| FetchError::Configuration(e.to_string()))?;

        if !config.has_subscription_key() {
            warn!(
                target: "nzbn_mcp::client",
                "No subscription key configured; the gateway will reject requests until NZBN_API_KEY is set"
            );
        }

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Gateway root without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The preconfigured HTTP client (headers, timeout) used for every request.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// URL of the entity resource for an NZBN.
    pub fn entity_url(&self, nzbn: &Nzbn) -> String {
        format!("{}/entities/{}", self.base_url, nzbn)
    }

    /// Fetch the full entity record for an NZBN.
    ///
    /// The record is returned as decoded JSON and is never inspected.
    ///
    /// # Errors
    ///
    /// * [`FetchError::Status`] for any non-2xx response.
    /// * [`FetchError::Timeout`] if the response does not complete in time.
    /// * Other variants for connection, decoding or transport failures.
    pub async fn get_entity(&self, nzbn: &Nzbn) -> FetchResult<Value> {
        let url = self.entity_url(nzbn);
        debug!(target: "nzbn_mcp::client", "GET {}", url);

        let response = self.http_client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!(target: "nzbn_mcp::client", "GET {} returned {}", url, status);
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.json::<Value>().await?;
        debug!(target: "nzbn_mcp::client", "GET {} succeeded", url);

        Ok(body)
    }
}
