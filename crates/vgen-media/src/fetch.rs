//! Media fetch: local path passthrough or remote URL download.
//!
//! Remote resources are streamed to a job-scoped temp file the handle
//! owns exclusively; the file is deleted when the handle drops, on
//! success and failure paths alike. Local paths are borrowed and never
//! deleted.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

use crate::error::{MediaError, MediaResult};

/// A locally decodable media file, owned or borrowed.
pub enum FetchedMedia {
    /// Caller-provided local file; not deleted on drop.
    Local(PathBuf),
    /// Downloaded copy inside an owned temp directory; deleted on drop.
    Downloaded { path: PathBuf, _dir: TempDir },
}

impl FetchedMedia {
    /// Path to the decodable file.
    pub fn path(&self) -> &Path {
        match self {
            Self::Local(path) => path,
            Self::Downloaded { path, .. } => path,
        }
    }
}

/// Resolve a media reference to a local file.
///
/// `http(s)` URLs are downloaded into a temp directory named by
/// `job_id`, so concurrent jobs never collide; anything else is
/// treated as a local path and must exist.
pub async fn fetch_media(media: &str, job_id: Uuid) -> MediaResult<FetchedMedia> {
    if media.starts_with("http://") || media.starts_with("https://") {
        download_to_temp(media, job_id).await
    } else {
        let path = PathBuf::from(media);
        if !path.exists() {
            return Err(MediaError::FileNotFound(path));
        }
        Ok(FetchedMedia::Local(path))
    }
}

async fn download_to_temp(url: &str, job_id: Uuid) -> MediaResult<FetchedMedia> {
    let dir = tempfile::Builder::new()
        .prefix(&format!("vgen-fetch-{job_id}-"))
        .tempdir()?;

    let file_name = url
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or("media.bin")
        // Strip query strings from the saved name
        .split('?')
        .next()
        .unwrap_or("media.bin")
        .to_string();
    let path = dir.path().join(file_name);

    debug!(url, path = %path.display(), "Downloading media");

    let response = reqwest::get(url)
        .await
        .map_err(|e| MediaError::download_failed(e.to_string()))?;

    if !response.status().is_success() {
        return Err(MediaError::download_failed(format!(
            "HTTP {} for {url}",
            response.status()
        )));
    }

    let mut file = tokio::fs::File::create(&path).await?;
    let mut response = response;
    let mut total: u64 = 0;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| MediaError::download_failed(e.to_string()))?
    {
        total += chunk.len() as u64;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    if total == 0 {
        return Err(MediaError::download_failed(format!("Empty body for {url}")));
    }

    debug!(bytes = total, "Download complete");

    Ok(FetchedMedia::Downloaded { path, _dir: dir })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_path_passthrough() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let media = fetch_media(temp.path().to_str().unwrap(), Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(media.path(), temp.path());
    }

    #[tokio::test]
    async fn test_missing_local_path() {
        let result = fetch_media("/nonexistent/clip.mp4", Uuid::new_v4()).await;
        assert!(matches!(result, Err(MediaError::FileNotFound(_))));
    }

    #[test]
    fn test_downloaded_temp_cleanup_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.wav");
        std::fs::write(&path, b"pcm").unwrap();

        let kept_path;
        {
            let media = FetchedMedia::Downloaded {
                path: path.clone(),
                _dir: dir,
            };
            kept_path = media.path().to_path_buf();
            assert!(kept_path.exists());
        }
        assert!(!kept_path.exists());
    }
}
