//! Synchronous snapshot downloads.

use crate::Result;
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::de::DeserializeOwned;

const LOG_TARGET: &str = "      fetch";

/// Downloads JSON documents over HTTP with a fixed timeout.
///
/// This is the only stage of the pipeline that touches the network. When
/// `offline` is set no client is built at all and every fetch fails
/// immediately, so runs are served entirely from the cache.
#[derive(Debug)]
pub struct Fetcher {
    client: Option<reqwest::blocking::Client>,
}

impl Fetcher {
    /// Create a new fetcher with the given request timeout.
    pub fn new(timeout: Duration, offline: bool) -> Result<Self> {
        if offline {
            return Ok(Self { client: None });
        }

        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .into_app_err("creating HTTP client")?;

        Ok(Self { client: Some(client) })
    }

    /// Download a JSON document and deserialize it.
    ///
    /// Any failure identifies the offending URL: connection errors, non-2xx
    /// statuses, and documents that don't match the expected shape are all
    /// fatal for that source.
    pub fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let Some(client) = &self.client else {
            return Err(app_err!("offline mode is enabled and '{url}' is not in the cache"));
        };

        log::info!(target: LOG_TARGET, "Downloading {url}");

        let response = client
            .get(url)
            .send()
            .into_app_err_with(|| format!("requesting '{url}'"))?
            .error_for_status()
            .into_app_err_with(|| format!("requesting '{url}'"))?;

        response.json().into_app_err_with(|| format!("decoding JSON from '{url}'"))
    }

    /// Whether this fetcher can reach the network.
    #[must_use]
    pub const fn is_online(&self) -> bool {
        self.client.is_some()
    }
}
