//! Client connection settings.
//!
//! Built from the global `--api-url` and `--timeout-secs` flags; `--api-url`
//! falls back to `RDESK_API_URL`.

use url::Url;

use crate::client::ClientError;

/// Where the API runs when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

/// Request timeout when nothing else is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for [`crate::client::ReviewClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL, always ending in `/`.
    pub api_url: Url,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Parse the base URL. A missing trailing slash is added so that
    /// endpoint paths join under any path prefix.
    pub fn new(api_url: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        let mut api_url = Url::parse(api_url.trim())?;
        if !api_url.path().ends_with('/') {
            let path = format!("{}/", api_url.path());
            api_url.set_path(&path);
        }
        Ok(Self {
            api_url,
            timeout_secs,
        })
    }
}
