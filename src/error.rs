//! Error types for stream metadata operations.

use thiserror::Error;

/// Errors that can occur when fetching or querying stream metadata.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The program was invoked with missing or unknown arguments.
    #[error("usage: {0} aws-ami|download-iso")]
    Usage(String),

    /// HTTP request error (connection, DNS, TLS, or a body read cut short).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// An artifact download answered with a non-success status.
    #[error("{url} returned status: {status}")]
    Http {
        /// The requested location.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The document is not JSON or does not have the stream shape.
    #[error("malformed stream metadata: {0}")]
    MalformedDocument(#[from] serde_json::Error),

    /// A key required for the lookup is absent from the document.
    #[error(transparent)]
    NotFound(#[from] NotFound),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// No local file name can be derived from a disk location.
    #[error("cannot derive a file name from location {0}")]
    InvalidLocation(String),
}

/// The first missing link of a lookup in an otherwise well-formed document.
///
/// Each variant carries the prefix produced by [`Stream::format_prefix`]
/// (`"{stream}/{arch}"`) so messages identify where the lookup stopped.
///
/// [`Stream::format_prefix`]: crate::Stream::format_prefix
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFound {
    #[error("{prefix}: no such architecture in stream")]
    Architecture { prefix: String },

    #[error("{prefix}: no AWS images for architecture")]
    AwsImages { prefix: String },

    #[error("{prefix}: no AWS images for region {region}")]
    AwsRegion { prefix: String, region: String },

    #[error("{prefix}: artifact '{artifact}' not found")]
    Artifact { prefix: String, artifact: String },

    #[error("{prefix}: artifact '{artifact}' format '{format}' not found")]
    Format {
        prefix: String,
        artifact: String,
        format: String,
    },

    #[error("{prefix}: artifact '{artifact}' format '{format}' has no disk")]
    Disk {
        prefix: String,
        artifact: String,
        format: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            StreamError::Usage("fcos-stream".to_string()).to_string(),
            "usage: fcos-stream aws-ami|download-iso"
        );
        assert_eq!(
            StreamError::Http {
                url: "https://example.com/a.iso".to_string(),
                status: 404,
            }
            .to_string(),
            "https://example.com/a.iso returned status: 404"
        );
        assert_eq!(
            StreamError::InvalidLocation("nope".to_string()).to_string(),
            "cannot derive a file name from location nope"
        );
    }

    #[test]
    fn test_not_found_display() {
        let prefix = "stable/x86_64".to_string();
        assert_eq!(
            NotFound::Architecture {
                prefix: prefix.clone()
            }
            .to_string(),
            "stable/x86_64: no such architecture in stream"
        );
        assert_eq!(
            NotFound::AwsImages {
                prefix: prefix.clone()
            }
            .to_string(),
            "stable/x86_64: no AWS images for architecture"
        );
        assert_eq!(
            NotFound::AwsRegion {
                prefix: prefix.clone(),
                region: "us-west-1".to_string(),
            }
            .to_string(),
            "stable/x86_64: no AWS images for region us-west-1"
        );
        assert_eq!(
            NotFound::Format {
                prefix,
                artifact: "metal".to_string(),
                format: "iso".to_string(),
            }
            .to_string(),
            "stable/x86_64: artifact 'metal' format 'iso' not found"
        );
    }

    #[test]
    fn test_not_found_is_transparent() {
        let err = StreamError::from(NotFound::Artifact {
            prefix: "stable/aarch64".to_string(),
            artifact: "metal".to_string(),
        });
        assert_eq!(err.to_string(), "stable/aarch64: artifact 'metal' not found");
    }
}
