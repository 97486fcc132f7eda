//! Artifact fetch capability and fetch-to-file.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

use crate::error::StreamError;
use crate::stream::Disk;

/// Something that can stream the resource at a location into a writer.
///
/// [`StreamClient`](crate::StreamClient) implements this over HTTP; tests
/// substitute in-memory fetchers.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    /// Write the resource at `location` into `sink`, returning the number of
    /// bytes written.
    async fn fetch<W>(&self, location: &str, sink: &mut W) -> Result<u64, StreamError>
    where
        W: AsyncWrite + Unpin;
}

/// Download `disk` into `dir`, naming the file after the last path segment
/// of its location.
///
/// An existing file of the same name is truncated. If the fetch fails
/// partway, the partially written file is left on disk.
///
/// # Errors
///
/// Returns `StreamError::Io` if the file cannot be created or written, or the
/// fetcher's error if the transfer fails.
pub async fn fetch_to_file<F: Fetch>(
    disk: &Disk,
    fetcher: &F,
    dir: &Path,
) -> Result<PathBuf, StreamError> {
    let path = dir.join(disk.file_name()?);
    let file = File::create(&path).await?;
    let mut writer = BufWriter::new(file);

    let written = disk.fetch(fetcher, &mut writer).await?;
    writer.flush().await?;
    writer.into_inner().sync_all().await?;

    tracing::info!(path = %path.display(), bytes = written, "downloaded {}", disk.location);
    Ok(path)
}
