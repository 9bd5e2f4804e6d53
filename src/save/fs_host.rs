//! File-system backed save host.
//!
//! Object references are hidden staging files inside the output directory;
//! the download action copies the staged bytes to a unique, sanitized
//! destination next to them.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};

use super::{Blob, ObjectUrl, SaveError, SaveHost, SavedTrack};
use crate::download::filename::resolve_unique_path;

/// Scheme prefix of references minted by [`FileSystemHost`].
const OBJECT_URL_PREFIX: &str = "blob:soundgrab/";

/// Bounded attempts at claiming a destination that another save grabbed first.
const MAX_CLAIM_ATTEMPTS: usize = 16;

/// Saves downloads into a directory on the local file system.
#[derive(Debug)]
pub struct FileSystemHost {
    output_dir: PathBuf,
    staged: DashMap<String, PathBuf>,
    next_id: AtomicU64,
}

impl FileSystemHost {
    /// Creates a host saving into `output_dir`. The directory is created on first use.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            staged: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Directory downloads are saved into.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Number of references created and not yet revoked.
    #[must_use]
    pub fn live_references(&self) -> usize {
        self.staged.len()
    }

    fn staging_path(&self, id: u64) -> PathBuf {
        self.output_dir
            .join(format!(".soundgrab-{}-{id}.part", std::process::id()))
    }

    async fn claim_destination(&self, filename: &str) -> Result<(PathBuf, File), SaveError> {
        let mut last_path = self.output_dir.join(filename);
        for _ in 0..MAX_CLAIM_ATTEMPTS {
            let candidate = resolve_unique_path(&self.output_dir, filename);
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
                .await
            {
                Ok(file) => return Ok((candidate, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(path = %candidate.display(), "destination taken, retrying");
                    last_path = candidate;
                }
                Err(e) => return Err(SaveError::io(candidate, e)),
            }
        }
        Err(SaveError::io(
            last_path,
            std::io::Error::new(ErrorKind::AlreadyExists, "no free destination filename"),
        ))
    }
}

#[async_trait]
impl SaveHost for FileSystemHost {
    #[instrument(level = "debug", skip(self, blob), fields(bytes = blob.len()))]
    async fn create_object_url(&self, blob: Blob) -> Result<ObjectUrl, SaveError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| SaveError::io(self.output_dir.clone(), e))?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let path = self.staging_path(id);
        if let Err(e) = tokio::fs::write(&path, blob.data()).await {
            let _ = tokio::fs::remove_file(&path).await;
            return Err(SaveError::io(path, e));
        }

        let url = ObjectUrl::new(format!("{OBJECT_URL_PREFIX}{id}"));
        self.staged.insert(url.as_str().to_string(), path);
        Ok(url)
    }

    #[instrument(level = "debug", skip(self), fields(url = %url))]
    async fn trigger_download(
        &self,
        url: &ObjectUrl,
        filename: &str,
    ) -> Result<SavedTrack, SaveError> {
        let staged = self
            .staged
            .get(url.as_str())
            .map(|entry| entry.value().clone())
            .ok_or_else(|| SaveError::unknown_object_url(url.as_str()))?;

        let (destination, mut target) = self.claim_destination(filename).await?;
        let copy_result = async {
            let mut source = File::open(&staged)
                .await
                .map_err(|e| SaveError::io(staged.clone(), e))?;
            let bytes = tokio::io::copy(&mut source, &mut target)
                .await
                .map_err(|e| SaveError::io(destination.clone(), e))?;
            target
                .flush()
                .await
                .map_err(|e| SaveError::io(destination.clone(), e))?;
            Ok::<u64, SaveError>(bytes)
        }
        .await;

        let bytes = match copy_result {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(path = %destination.display(), "cleaning up partial file after error");
                drop(target);
                let _ = tokio::fs::remove_file(&destination).await;
                return Err(e);
            }
        };

        info!(path = %destination.display(), bytes, "track saved");
        Ok(SavedTrack {
            filename: filename.to_string(),
            location: destination,
            bytes,
        })
    }

    #[instrument(level = "debug", skip(self), fields(url = %url))]
    async fn revoke_object_url(&self, url: ObjectUrl) {
        let Some((_, path)) = self.staged.remove(url.as_str()) else {
            debug!("reference already revoked or unknown");
            return;
        };
        if let Err(e) = tokio::fs::remove_file(&path).await
            && e.kind() != ErrorKind::NotFound
        {
            warn!(path = %path.display(), error = %e, "failed to remove staged payload");
        }
    }
}

impl Drop for FileSystemHost {
    fn drop(&mut self) {
        for entry in self.staged.iter() {
            if let Err(e) = std::fs::remove_file(entry.value())
                && e.kind() != ErrorKind::NotFound
            {
                warn!(path = %entry.value().display(), error = %e, "failed to remove leftover staged payload");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bytes::Bytes;
    use tempfile::TempDir;

    use super::*;

    fn staged_files(dir: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "part"))
            .collect()
    }

    #[tokio::test]
    async fn test_create_object_url_stages_payload() {
        let temp_dir = TempDir::new().unwrap();
        let host = FileSystemHost::new(temp_dir.path());

        let url = host
            .create_object_url(Blob::new(Bytes::from_static(b"ID3 audio")))
            .await
            .unwrap();

        assert!(url.as_str().starts_with(OBJECT_URL_PREFIX));
        assert_eq!(host.live_references(), 1);
        let staged = staged_files(temp_dir.path());
        assert_eq!(staged.len(), 1);
        assert_eq!(std::fs::read(&staged[0]).unwrap(), b"ID3 audio");
    }

    #[tokio::test]
    async fn test_create_object_url_creates_missing_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("music").join("incoming");
        let host = FileSystemHost::new(&nested);

        host.create_object_url(Blob::new(Bytes::from_static(b"x")))
            .await
            .unwrap();

        assert!(nested.is_dir());
    }

    #[tokio::test]
    async fn test_trigger_then_revoke_leaves_only_saved_file() {
        let temp_dir = TempDir::new().unwrap();
        let host = FileSystemHost::new(temp_dir.path());

        let url = host
            .create_object_url(Blob::new(Bytes::from_static(b"audio bytes")))
            .await
            .unwrap();
        let saved = host.trigger_download(&url, "mytrack.mp3").await.unwrap();
        host.revoke_object_url(url).await;

        assert_eq!(saved.location, temp_dir.path().join("mytrack.mp3"));
        assert_eq!(saved.bytes, 11);
        assert_eq!(std::fs::read(&saved.location).unwrap(), b"audio bytes");
        assert!(staged_files(temp_dir.path()).is_empty());
        assert_eq!(host.live_references(), 0);
    }

    #[tokio::test]
    async fn test_trigger_download_adds_suffix_for_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("song.mp3"), b"old").unwrap();
        let host = FileSystemHost::new(temp_dir.path());

        let url = host
            .create_object_url(Blob::new(Bytes::from_static(b"new")))
            .await
            .unwrap();
        let saved = host.trigger_download(&url, "song.mp3").await.unwrap();
        host.revoke_object_url(url).await;

        assert_eq!(saved.location, temp_dir.path().join("song_2.mp3"));
        assert_eq!(std::fs::read(temp_dir.path().join("song.mp3")).unwrap(), b"old");
    }

    #[tokio::test]
    async fn test_trigger_download_sanitizes_traversal_filename() {
        let temp_dir = TempDir::new().unwrap();
        let host = FileSystemHost::new(temp_dir.path());

        let url = host
            .create_object_url(Blob::new(Bytes::from_static(b"x")))
            .await
            .unwrap();
        let saved = host.trigger_download(&url, "../../etc/passwd").await.unwrap();
        host.revoke_object_url(url).await;

        assert_eq!(saved.location.parent().unwrap(), temp_dir.path());
    }

    #[tokio::test]
    async fn test_trigger_download_unknown_reference() {
        let temp_dir = TempDir::new().unwrap();
        let host = FileSystemHost::new(temp_dir.path());

        let result = host
            .trigger_download(&ObjectUrl::new("blob:soundgrab/999"), "a.mp3")
            .await;

        assert!(matches!(result, Err(SaveError::UnknownObjectUrl { .. })));
        assert!(!temp_dir.path().join("a.mp3").exists());
    }

    #[tokio::test]
    async fn test_revoke_twice_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let host = FileSystemHost::new(temp_dir.path());

        let url = host
            .create_object_url(Blob::new(Bytes::from_static(b"x")))
            .await
            .unwrap();
        let copy = ObjectUrl::new(url.as_str());
        host.revoke_object_url(url).await;
        host.revoke_object_url(copy).await;

        assert_eq!(host.live_references(), 0);
    }

    #[tokio::test]
    async fn test_drop_removes_unrevoked_staging_files() {
        let temp_dir = TempDir::new().unwrap();
        {
            let host = FileSystemHost::new(temp_dir.path());
            host.create_object_url(Blob::new(Bytes::from_static(b"x")))
                .await
                .unwrap();
            assert_eq!(staged_files(temp_dir.path()).len(), 1);
        }
        assert!(staged_files(temp_dir.path()).is_empty());
    }
}
