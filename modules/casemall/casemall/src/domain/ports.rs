use async_trait::async_trait;
use casemall_sdk::ImageUpload;

use crate::domain::error::DomainError;

/// A product image after it has been written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub img_name: String,
    pub ori_img_name: String,
    pub img_url: String,
}

/// Output port for product image files.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn save(&self, upload: &ImageUpload) -> Result<StoredImage, DomainError>;

    /// Removing an image that is already gone is not an error.
    async fn delete(&self, img_name: &str) -> Result<(), DomainError>;
}
