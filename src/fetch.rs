//! Photograph download and temporary-file lifecycle.
//!
//! The webhook only carries a URL; the pipeline needs the bytes on disk.
//! Downloads land in uniquely named files wrapped in a [`TempPhoto`] guard
//! so the file is removed on every exit path.

use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::CartellError;

/// A downloaded photograph on disk, removed on every exit path.
///
/// Dropping the guard removes the file best-effort and logs a failure, so
/// a prior render error stays the reported one. Call
/// [`cleanup`](TempPhoto::cleanup) on the success path to surface deletion
/// errors instead.
#[derive(Debug)]
pub struct TempPhoto {
    path: PathBuf,
    cleaned: bool,
}

impl TempPhoto {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cleaned: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the file now, surfacing the deletion error if any.
    pub fn cleanup(mut self) -> Result<(), CartellError> {
        self.cleaned = true;
        fs::remove_file(&self.path).map_err(CartellError::Io)
    }
}

impl Drop for TempPhoto {
    fn drop(&mut self) {
        if !self.cleaned {
            if let Err(e) = fs::remove_file(&self.path) {
                log::warn!("could not remove {}: {}", self.path.display(), e);
            }
        }
    }
}

/// Download `url` into a uniquely named file under `dir`.
pub async fn fetch_photo(
    client: &reqwest::Client,
    url: &str,
    dir: &Path,
) -> Result<TempPhoto, CartellError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| CartellError::Download(format!("{}: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(CartellError::Download(format!(
            "{}: HTTP {}",
            url,
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| CartellError::Download(format!("{}: {}", url, e)))?;

    let path = dir.join(format!("cartell-photo-{}", Uuid::new_v4()));
    tokio::fs::write(&path, &bytes).await?;

    Ok(TempPhoto::new(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_photo(dir: &Path) -> PathBuf {
        let path = dir.join("photo.png");
        fs::write(&path, b"bytes").unwrap();
        path
    }

    #[test]
    fn test_cleanup_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = scratch_photo(dir.path());

        let photo = TempPhoto::new(path.clone());
        photo.cleanup().unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn test_drop_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = scratch_photo(dir.path());

        {
            let _photo = TempPhoto::new(path.clone());
        }

        assert!(!path.exists());
    }

    #[test]
    fn test_cleanup_surfaces_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let photo = TempPhoto::new(dir.path().join("never-created"));

        let err = photo.cleanup().unwrap_err();
        assert!(matches!(err, CartellError::Io(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_download_error() {
        let dir = tempfile::tempdir().unwrap();
        let client = reqwest::Client::new();

        let err = fetch_photo(&client, "http://127.0.0.1:1/pic.png", dir.path())
            .await
            .unwrap_err();

        assert!(matches!(err, CartellError::Download(_)));
    }
}
