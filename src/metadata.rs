//! StreamMetadata struct and core implementation.

use crate::channel::Channel;
use crate::client::{StreamClient, DEFAULT_BASE_URL};
use crate::error::StreamError;
use crate::stream::Stream;

/// Main interface for fetching a channel's stream metadata.
///
/// # Example
///
/// ```ignore
/// use coreos_stream_metadata::{aws_ami, Channel, StreamError, StreamMetadata};
///
/// #[tokio::main]
/// async fn main() -> Result<(), StreamError> {
///     let metadata = StreamMetadata::new(Channel::Stable)?;
///     let stream = metadata.fetch().await?;
///     println!("{}", aws_ami(&stream, "x86_64", "us-east-2")?);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StreamMetadata {
    channel: Channel,
    client: StreamClient,
}

impl StreamMetadata {
    /// Create a StreamMetadata instance for `channel` on the public build service.
    pub fn new(channel: Channel) -> Result<Self, StreamError> {
        Self::with_base_url(channel, DEFAULT_BASE_URL)
    }

    /// Create a StreamMetadata instance for `channel` with a custom base URL.
    ///
    /// This is primarily useful for testing with mock servers.
    pub fn with_base_url(channel: Channel, base_url: &str) -> Result<Self, StreamError> {
        Ok(Self {
            channel,
            client: StreamClient::new(base_url)?,
        })
    }

    /// Get the channel.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Get the HTTP client, which also fetches artifacts.
    pub fn client(&self) -> &StreamClient {
        &self.client
    }

    /// Fetch and parse the stream document.
    ///
    /// # Errors
    ///
    /// Returns `StreamError::Request` if the document cannot be fetched and
    /// `StreamError::MalformedDocument` if it does not parse.
    pub async fn fetch(&self) -> Result<Stream, StreamError> {
        let body = self.client.fetch_document(self.channel).await?;
        Stream::from_slice(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_constructor() {
        let metadata = StreamMetadata::new(Channel::Stable).unwrap();
        assert_eq!(metadata.channel(), Channel::Stable);
        assert_eq!(metadata.client().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_with_base_url() {
        let metadata = StreamMetadata::with_base_url(Channel::Testing, "http://localhost:8080").unwrap();
        assert_eq!(metadata.channel(), Channel::Testing);
        assert_eq!(metadata.client().base_url(), "http://localhost:8080");
    }
}
