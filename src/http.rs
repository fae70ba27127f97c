//! HTTP layer for manifest and segment fetching
//!
//! A thin wrapper around [`reqwest::Client`] that bakes the fixed `Referer`
//! and `User-Agent` headers and the per-request timeout into the client at
//! construction time. The origin server rejects requests without those
//! headers, so every outbound GET carries them.

use crate::config::HttpConfig;
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};
use tracing::debug;

/// HTTP client carrying the fixed header configuration
///
/// Cloning is cheap (the inner [`reqwest::Client`] is reference-counted).
/// All requests are plain GETs with no retries; a non-success status is
/// reported as [`Error::HttpStatus`].
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Build a client from the immutable HTTP configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a configured header value contains
    /// characters that are not legal in an HTTP header, or if the
    /// underlying client cannot be constructed.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, header_value(&config.referer, "referer")?);
        headers.insert(USER_AGENT, header_value(&config.user_agent, "user_agent")?);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self { client })
    }

    /// GET a URL and return the response body as text.
    ///
    /// Used for the manifest, which is consumed once as a string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] on request failure or timeout, and
    /// [`Error::HttpStatus`] on any non-success status.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.get_checked(url).await?;
        Ok(response.text().await?)
    }

    /// GET a URL and return the raw response body.
    ///
    /// Used for segments, whose bytes are written to disk verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] on request failure or timeout, and
    /// [`Error::HttpStatus`] on any non-success status.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.get_checked(url).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Issue the GET and map a non-success status to an error.
    async fn get_checked(&self, url: &str) -> Result<reqwest::Response> {
        debug!(url, "issuing GET");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }
}

fn header_value(value: &str, key: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Error::Config {
        message: format!("invalid header value for '{key}': {e}"),
        key: Some(key.to_string()),
    })
}
