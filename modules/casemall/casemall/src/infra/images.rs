//! Product image files on the local filesystem.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use casemall_sdk::ImageUpload;
use tracing::debug;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::ports::{ImageStore, StoredImage};

/// Stores uploads under `root` with a random name and serves them from
/// `url_prefix`.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    root: PathBuf,
    url_prefix: String,
    max_bytes: usize,
}

impl FsImageStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, url_prefix: &str, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_owned(),
            max_bytes,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_name(original: &str) -> String {
        let ext = Path::new(original)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(str::to_ascii_lowercase);
        match ext {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        }
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn save(&self, upload: &ImageUpload) -> Result<StoredImage, DomainError> {
        if upload.bytes.is_empty() {
            return Err(DomainError::validation(
                "images",
                format!("'{}' is empty", upload.original_name),
            ));
        }
        if upload.bytes.len() > self.max_bytes {
            return Err(DomainError::validation(
                "images",
                format!(
                    "'{}' exceeds {} bytes",
                    upload.original_name, self.max_bytes
                ),
            ));
        }

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| DomainError::storage(format!("create {}: {e}", self.root.display())))?;

        let img_name = Self::file_name(&upload.original_name);
        let path = self.root.join(&img_name);
        tokio::fs::write(&path, &upload.bytes)
            .await
            .map_err(|e| DomainError::storage(format!("write {}: {e}", path.display())))?;
        debug!(img_name = %img_name, bytes = upload.bytes.len(), "Stored product image");

        Ok(StoredImage {
            img_url: format!("{}/{img_name}", self.url_prefix),
            img_name,
            ori_img_name: upload.original_name.clone(),
        })
    }

    async fn delete(&self, img_name: &str) -> Result<(), DomainError> {
        // stored names never contain separators; refuse anything else
        if img_name.contains(['/', '\\']) || img_name.starts_with('.') {
            return Err(DomainError::validation("img_name", "invalid image name"));
        }
        let path = self.root.join(img_name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::storage(format!(
                "remove {}: {e}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn upload(name: &str, bytes: &[u8]) -> ImageUpload {
        ImageUpload {
            original_name: name.to_owned(),
            content_type: Some("image/png".to_owned()),
            bytes: bytes.to_vec(),
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn save_then_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsImageStore::new(dir.path(), "/images/", 1024);

        let stored = store.save(&upload("Case Front.PNG", b"png")).await.unwrap();
        assert!(stored.img_name.ends_with(".png"));
        assert_eq!(stored.ori_img_name, "Case Front.PNG");
        assert_eq!(stored.img_url, format!("/images/{}", stored.img_name));
        assert!(dir.path().join(&stored.img_name).exists());
        assert!(logs_contain("Stored product image"));

        store.delete(&stored.img_name).await.unwrap();
        assert!(!dir.path().join(&stored.img_name).exists());
        // already gone
        store.delete(&stored.img_name).await.unwrap();
    }

    #[tokio::test]
    async fn rejects_empty_and_oversized_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsImageStore::new(dir.path(), "/images", 4);

        assert!(matches!(
            store.save(&upload("a.png", b"")).await,
            Err(DomainError::Validation { .. })
        ));
        assert!(matches!(
            store.save(&upload("a.png", b"12345")).await,
            Err(DomainError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn delete_refuses_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsImageStore::new(dir.path(), "/images", 4);
        assert!(store.delete("../secret").await.is_err());
    }
}
