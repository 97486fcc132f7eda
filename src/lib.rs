//! Minimal Rust client for Fedora CoreOS stream metadata.
//!
//! A stream document describes every artifact published for a release
//! channel: install media and disk images per architecture, and the cloud
//! images built from them. This crate fetches and parses that document and
//! answers two questions about it: which AMI to launch in an AWS region, and
//! where to download the live ISO from.
//!
//! # Example
//!
//! ```ignore
//! use coreos_stream_metadata::{download_iso, Channel, StreamError, StreamMetadata};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), StreamError> {
//!     let metadata = StreamMetadata::new(Channel::Stable)?;
//!     let stream = metadata.fetch().await?;
//!
//!     // Writes e.g. ./fedora-coreos-38.20230430.3.1-live.x86_64.iso
//!     let path = download_iso(&stream, "x86_64", metadata.client(), ".".as_ref()).await?;
//!     println!("{}", path.display());
//!     Ok(())
//! }
//! ```
//!
//! # Lookup failures
//!
//! | Lookup | Fails with |
//! |--------|------------|
//! | [`aws_ami`] | architecture, AWS images, region |
//! | [`download_iso`] | architecture, `metal` artifact, `iso` format, disk |

mod channel;
mod client;
mod error;
mod fetch;
mod metadata;
mod select;
mod stream;

pub use channel::Channel;
pub use client::{StreamClient, DEFAULT_BASE_URL};
pub use error::{NotFound, StreamError};
pub use fetch::{fetch_to_file, Fetch};
pub use metadata::StreamMetadata;
pub use select::{aws_ami, download_iso, ISO_FORMAT, METAL_ARTIFACT};
pub use stream::{
    Architecture, Artifact, AwsImages, AwsRegionImage, Disk, GcpImage, ImageFormat, Images,
    Metadata, Stream,
};
