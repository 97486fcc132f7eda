//! Stream metadata document model and lookups.
//!
//! The document is a tree of string-keyed maps:
//! architectures → artifacts → formats → disk, and
//! architectures → images → AWS → regions. A missing key is reported as
//! [`NotFound`], never as a malformed document.

use std::collections::BTreeMap;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWrite;

use crate::error::{NotFound, StreamError};
use crate::fetch::Fetch;

/// Root of a stream metadata document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stream {
    /// Channel name, e.g. `stable`.
    pub stream: String,
    pub metadata: Metadata,
    /// Architecture name (e.g. `x86_64`) to its artifacts and images.
    pub architectures: BTreeMap<String, Architecture>,
}

/// Document-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
}

/// Everything published for one architecture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Architecture {
    /// Artifact kind (e.g. `metal`, `qemu`) to its formats.
    pub artifacts: BTreeMap<String, Artifact>,
    pub images: Images,
}

/// A category of build output, keyed by format name (e.g. `iso`, `raw.xz`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Artifact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
    pub formats: BTreeMap<String, ImageFormat>,
}

/// The files making up one format of an artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk: Option<Disk>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kernel: Option<Disk>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initramfs: Option<Disk>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rootfs: Option<Disk>,
}

/// A downloadable file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Disk {
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncompressed_sha256: Option<String>,
}

/// Cloud images published for one architecture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Images {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws: Option<AwsImages>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcp: Option<GcpImage>,
}

/// AWS images keyed by region name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsImages {
    pub regions: BTreeMap<String, AwsRegionImage>,
}

/// The AMI published in one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsRegionImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
    /// Opaque AMI identifier, e.g. `ami-0123456789abcdef0`.
    pub image: String,
}

/// The GCP image family for one architecture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcpImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Stream {
    /// Parse a stream document from raw bytes.
    ///
    /// Unknown fields are ignored and absent optional fields stay `None`.
    ///
    /// # Errors
    ///
    /// Returns `StreamError::MalformedDocument` if the bytes are not JSON or
    /// do not match the document shape.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, StreamError> {
        serde_json::from_slice(bytes).map_err(StreamError::from)
    }

    /// Prefix used to identify an architecture of this stream in messages.
    pub fn format_prefix(&self, arch: &str) -> String {
        if self.stream.is_empty() {
            arch.to_string()
        } else {
            format!("{}/{}", self.stream, arch)
        }
    }

    /// Look up an architecture by exact name.
    pub fn architecture(&self, arch: &str) -> Result<&Architecture, NotFound> {
        self.architectures
            .get(arch)
            .ok_or_else(|| NotFound::Architecture {
                prefix: self.format_prefix(arch),
            })
    }

    /// Look up the AMI for an architecture and region.
    pub fn aws_region_image(&self, arch: &str, region: &str) -> Result<&AwsRegionImage, NotFound> {
        let aws = self
            .architecture(arch)?
            .images
            .aws
            .as_ref()
            .ok_or_else(|| NotFound::AwsImages {
                prefix: self.format_prefix(arch),
            })?;
        aws.regions.get(region).ok_or_else(|| NotFound::AwsRegion {
            prefix: self.format_prefix(arch),
            region: region.to_string(),
        })
    }

    /// Look up the disk of `format` within `artifact` for an architecture.
    pub fn query_disk(&self, arch: &str, artifact: &str, format: &str) -> Result<&Disk, NotFound> {
        let formats = &self
            .architecture(arch)?
            .artifacts
            .get(artifact)
            .ok_or_else(|| NotFound::Artifact {
                prefix: self.format_prefix(arch),
                artifact: artifact.to_string(),
            })?
            .formats;
        let image_format = formats.get(format).ok_or_else(|| NotFound::Format {
            prefix: self.format_prefix(arch),
            artifact: artifact.to_string(),
            format: format.to_string(),
        })?;
        image_format.disk.as_ref().ok_or_else(|| NotFound::Disk {
            prefix: self.format_prefix(arch),
            artifact: artifact.to_string(),
            format: format.to_string(),
        })
    }
}

impl Disk {
    /// Local file name for this disk: the last path segment of its location.
    ///
    /// # Errors
    ///
    /// Returns `StreamError::InvalidLocation` if the location is not a URL or
    /// its path ends without a file name.
    pub fn file_name(&self) -> Result<String, StreamError> {
        let invalid = || StreamError::InvalidLocation(self.location.clone());
        let url = Url::parse(&self.location).map_err(|_| invalid())?;
        url.path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or_else(invalid)
    }

    /// Fetch this disk into `sink`, returning the number of bytes written.
    pub async fn fetch<F, W>(&self, fetcher: &F, sink: &mut W) -> Result<u64, StreamError>
    where
        F: Fetch,
        W: AsyncWrite + Unpin,
    {
        fetcher.fetch(&self.location, sink).await
    }
}
