//! HTTP client wrapper for stream metadata and artifact requests.

use reqwest::Client;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::channel::Channel;
use crate::error::StreamError;
use crate::fetch::Fetch;

/// Base URL of the Fedora CoreOS build service.
pub const DEFAULT_BASE_URL: &str = "https://builds.coreos.fedoraproject.org";

/// HTTP client wrapper for stream metadata requests.
#[derive(Debug, Clone)]
pub struct StreamClient {
    inner: Client,
    base_url: String,
}

impl StreamClient {
    /// Create a new client against the given base URL.
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let inner = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            inner,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a new client against [`DEFAULT_BASE_URL`].
    pub fn with_default_base_url() -> Result<Self, reqwest::Error> {
        Self::new(DEFAULT_BASE_URL)
    }

    /// Get the underlying reqwest client.
    pub fn inner(&self) -> &Client {
        &self.inner
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the raw stream document for `channel`.
    ///
    /// The body is returned whatever the HTTP status; a non-JSON error page
    /// surfaces later as a malformed document.
    pub async fn fetch_document(&self, channel: Channel) -> Result<Vec<u8>, StreamError> {
        let url = channel.stream_url(&self.base_url);
        tracing::debug!(%url, "fetching stream metadata");

        let response = self.inner.get(&url).send().await?;
        tracing::debug!(status = response.status().as_u16(), "stream metadata response");

        Ok(response.bytes().await?.to_vec())
    }
}

impl Fetch for StreamClient {
    async fn fetch<W>(&self, location: &str, sink: &mut W) -> Result<u64, StreamError>
    where
        W: AsyncWrite + Unpin,
    {
        tracing::debug!(url = %location, "fetching artifact");
        let mut response = self.inner.get(location).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StreamError::Http {
                url: location.to_string(),
                status: status.as_u16(),
            });
        }

        let mut total = 0u64;
        while let Some(chunk) = response.chunk().await? {
            sink.write_all(&chunk).await?;
            total += chunk.len() as u64;
        }
        Ok(total)
    }
}
