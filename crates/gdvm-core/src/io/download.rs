//! Streaming asset downloads.
//!
//! Bytes are written to `<dest>.part` and renamed onto `dest` once the body
//! is complete, so the cache never holds a truncated archive under its
//! final name.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::Reporter;

/// Failure to fetch an asset.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// The server answered 404.
    #[error("{url} not found")]
    NotFound {
        /// Requested URL.
        url: String,
    },

    /// Any other HTTP or connection failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Writing the file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DownloadError {
    /// True when the server reported the asset missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Moves a remote file onto the local disk.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Download `url` to `dest`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// [`DownloadError::NotFound`] for a missing remote file, otherwise an
    /// HTTP or IO error. `dest` is left untouched on failure.
    async fn download(
        &self,
        url: &str,
        dest: &Path,
        reporter: &dyn Reporter,
    ) -> Result<u64, DownloadError>;
}

/// [`Transport`] over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Download through `client`.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn download(
        &self,
        url: &str,
        dest: &Path,
        reporter: &dyn Reporter,
    ) -> Result<u64, DownloadError> {
        tracing::debug!(%url, dest = %dest.display(), "downloading");

        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(DownloadError::NotFound {
                url: url.to_string(),
            });
        }
        let response = response.error_for_status()?;

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let part = part_path(dest);
        let result = write_part(response, &part, dest, reporter).await;
        if result.is_err() {
            tokio::fs::remove_file(&part).await.ok();
        }
        result
    }
}

/// Streams `response` into `part`, then renames it onto `dest`.
async fn write_part(
    response: reqwest::Response,
    part: &Path,
    dest: &Path,
    reporter: &dyn Reporter,
) -> Result<u64, DownloadError> {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let total = response.content_length();

    let mut file = File::create(part).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    reporter.downloading(&name, 0, total);
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
        reporter.downloading(&name, downloaded, total);
    }

    file.flush().await?;
    drop(file);
    tokio::fs::rename(part, dest).await?;

    Ok(downloaded)
}

/// Temporary path used while `dest` is being written.
pub fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullReporter;
    use mockito::Server;

    #[tokio::test]
    async fn test_download_writes_file() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/Godot_v4.2.1-stable_linux.x86_64.zip")
            .with_status(200)
            .with_body("archive-bytes")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("cache/godot/Godot_v4.2.1-stable_linux.x86_64.zip");
        let url = format!("{}/Godot_v4.2.1-stable_linux.x86_64.zip", server.url());

        let written = HttpTransport::new(Client::new())
            .download(&url, &dest, &NullReporter)
            .await
            .unwrap();

        assert_eq!(written, 13);
        assert_eq!(std::fs::read(&dest).unwrap(), b"archive-bytes");
        assert!(!part_path(&dest).exists());
    }

    #[tokio::test]
    async fn test_download_missing_is_not_found() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/missing.zip")
            .with_status(404)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing.zip");
        let err = HttpTransport::new(Client::new())
            .download(&format!("{}/missing.zip", server.url()), &dest, &NullReporter)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_download_server_error_is_http() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/broken.zip")
            .with_status(500)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let err = HttpTransport::new(Client::new())
            .download(
                &format!("{}/broken.zip", server.url()),
                &dir.path().join("broken.zip"),
                &NullReporter,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DownloadError::Http(_)));
    }

    #[tokio::test]
    async fn test_failed_rename_removes_part_file() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/blocked.zip")
            .with_status(200)
            .with_body("archive-bytes")
            .create_async()
            .await;

        // A non-empty directory already sits at the destination.
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("blocked.zip");
        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(dest.join("keep"), b"x").unwrap();

        let err = HttpTransport::new(Client::new())
            .download(&format!("{}/blocked.zip", server.url()), &dest, &NullReporter)
            .await
            .unwrap_err();

        assert!(matches!(err, DownloadError::Io(_)));
        assert!(!part_path(&dest).exists());
        assert!(dest.join("keep").exists());
    }
}
