//! Filesystem photo store.
//!
//! Photos are saved as `<item_id>_<YYYYmmdd_HHMMSS><ext>` in a flat directory.

use async_trait::async_trait;
use chrono::Local;
use fitify_core::error::StorageError;
use fitify_core::oracle::ImageUpload;
use fitify_core::repository::ImageStore;
use std::path::PathBuf;
use tracing::debug;

pub struct FsImageStore {
    dir: PathBuf,
}

impl FsImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file_name(item_id: &str, image: &ImageUpload) -> String {
        format!(
            "{item_id}_{}{}",
            Local::now().format("%Y%m%d_%H%M%S"),
            image.extension()
        )
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn save(&self, item_id: &str, image: &ImageUpload) -> Result<String, StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::Io {
                path: self.dir.display().to_string(),
                reason: format!("Failed to create image directory: {e}"),
            })?;

        let path = self.dir.join(Self::file_name(item_id, image));
        tokio::fs::write(&path, &image.bytes)
            .await
            .map_err(|e| StorageError::Io {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        debug!(item_id, path = %path.display(), bytes = image.bytes.len(), "Image saved");
        Ok(path.display().to_string())
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => {
                debug!(path, "Image removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io {
                path: path.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}
