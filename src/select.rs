//! The two lookups the command line exposes.

use std::path::{Path, PathBuf};

use crate::error::StreamError;
use crate::fetch::{fetch_to_file, Fetch};
use crate::stream::Stream;

/// Artifact kind holding bare-metal install media.
pub const METAL_ARTIFACT: &str = "metal";

/// Format name of the live ISO.
pub const ISO_FORMAT: &str = "iso";

/// Resolve the AWS image id for `arch` in `region`, verbatim.
///
/// # Errors
///
/// Returns `StreamError::NotFound` naming the architecture, the AWS images
/// or the region, whichever is missing first.
pub fn aws_ami<'a>(stream: &'a Stream, arch: &str, region: &str) -> Result<&'a str, StreamError> {
    Ok(stream.aws_region_image(arch, region)?.image.as_str())
}

/// Download the live ISO for `arch` into `dir`, returning the written path.
///
/// # Errors
///
/// Returns `StreamError::NotFound` if the architecture, the `metal` artifact,
/// its `iso` format or that format's disk is missing, and otherwise any
/// error of [`fetch_to_file`].
pub async fn download_iso<F: Fetch>(
    stream: &Stream,
    arch: &str,
    fetcher: &F,
    dir: &Path,
) -> Result<PathBuf, StreamError> {
    let disk = stream.query_disk(arch, METAL_ARTIFACT, ISO_FORMAT)?;
    fetch_to_file(disk, fetcher, dir).await
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use tokio::io::{AsyncWrite, AsyncWriteExt};

    use super::*;
    use crate::error::NotFound;

    /// Records the requested location and writes it back as the body.
    #[derive(Default)]
    struct Echo {
        calls: Cell<usize>,
    }

    impl Fetch for Echo {
        async fn fetch<W>(&self, location: &str, sink: &mut W) -> Result<u64, StreamError>
        where
            W: AsyncWrite + Unpin,
        {
            self.calls.set(self.calls.get() + 1);
            sink.write_all(location.as_bytes()).await?;
            Ok(location.len() as u64)
        }
    }

    fn stream(doc: &str) -> Stream {
        Stream::from_slice(doc.as_bytes()).unwrap()
    }

    #[test]
    fn test_aws_ami() {
        let stream = stream(
            r#"{"architectures":{"x86_64":{"images":{"aws":{"regions":{"us-east-2":{"image":"ami-0123456789abcdef0"}}}}}}}"#,
        );
        assert_eq!(
            aws_ami(&stream, "x86_64", "us-east-2").unwrap(),
            "ami-0123456789abcdef0"
        );
    }

    #[test]
    fn test_aws_ami_wrong_region() {
        let stream = stream(
            r#"{"architectures":{"x86_64":{"images":{"aws":{"regions":{"us-west-1":{"image":"ami-0123456789abcdef0"}}}}}}}"#,
        );
        let err = aws_ami(&stream, "x86_64", "us-east-2").unwrap_err();
        assert!(matches!(
            err,
            StreamError::NotFound(NotFound::AwsRegion { ref region, .. }) if region == "us-east-2"
        ));
        assert!(err.to_string().contains("region us-east-2"));
    }

    #[tokio::test]
    async fn test_download_iso() {
        let dir = tempfile::tempdir().unwrap();
        let location = "https://example.com/path/fedora-coreos-38.iso";
        let stream = stream(&format!(
            r#"{{"architectures":{{"x86_64":{{"artifacts":{{"metal":{{"formats":{{"iso":{{"disk":{{"location":"{location}"}}}}}}}}}}}}}}}}"#
        ));
        let fetcher = Echo::default();

        let path = download_iso(&stream, "x86_64", &fetcher, dir.path())
            .await
            .unwrap();

        assert_eq!(path.file_name().unwrap(), "fedora-coreos-38.iso");
        assert_eq!(std::fs::read(path).unwrap(), location.as_bytes());
        assert_eq!(fetcher.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_download_iso_missing_format_fetches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let stream = stream(
            r#"{"stream":"stable","architectures":{"x86_64":{"artifacts":{"metal":{"formats":{"raw.xz":{"disk":{"location":"https://example.com/a.raw.xz"}}}}}}}}"#,
        );
        let fetcher = Echo::default();

        let err = download_iso(&stream, "x86_64", &fetcher, dir.path())
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "stable/x86_64: artifact 'metal' format 'iso' not found"
        );
        assert_eq!(fetcher.calls.get(), 0);
    }
}
