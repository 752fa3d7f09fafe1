//! Product image storage

mod client;
mod errors;

use async_trait::async_trait;
use mockall::automock;

pub use client::{BucketStorageClient, StorageConfig};
pub use errors::ImageStorageError;

/// Folder within the bucket holding product images.
pub const IMAGE_FOLDER: &str = "events";

const FALLBACK_EXTENSION: &str = "jpg";

/// An image submitted alongside a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub extension: String,
    pub content_type: Option<String>,
}

impl ImageUpload {
    /// Build an upload, taking the extension from the client-supplied file name.
    #[must_use]
    pub fn from_file_name(file_name: &str, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, extension)| extension.to_ascii_lowercase())
            .filter(|extension| {
                !extension.is_empty() && extension.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .unwrap_or_else(|| FALLBACK_EXTENSION.to_string());

        Self {
            bytes,
            extension,
            content_type,
        }
    }

    /// Object path the image is stored under, e.g. `events/{uuid}.png`.
    #[must_use]
    pub fn object_path(&self, name: uuid::Uuid) -> String {
        format!("{IMAGE_FOLDER}/{name}.{}", self.extension)
    }
}

/// Extract the object path from a public URL, if the URL points into `bucket`.
pub fn object_path_from_url<'a>(url: &'a str, bucket: &str) -> Option<&'a str> {
    url.split_once(&format!("/{bucket}/"))
        .map(|(_, path)| path)
        .filter(|path| !path.is_empty())
}

#[automock]
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Upload an image and return its public URL.
    async fn upload(&self, image: ImageUpload) -> Result<String, ImageStorageError>;

    /// Remove the image behind a public URL.
    ///
    /// Returns `false` when the URL does not belong to this storage.
    async fn remove(&self, url: &str) -> Result<bool, ImageStorageError>;
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn extension_comes_from_file_name() {
        let upload = ImageUpload::from_file_name("Lemon Tart.PNG", None, vec![1, 2, 3]);

        assert_eq!(upload.extension, "png");
    }

    #[test]
    fn missing_or_odd_extension_falls_back() {
        assert_eq!(ImageUpload::from_file_name("photo", None, vec![]).extension, "jpg");
        assert_eq!(ImageUpload::from_file_name("photo.", None, vec![]).extension, "jpg");
        assert_eq!(ImageUpload::from_file_name("x.p/ng", None, vec![]).extension, "jpg");
    }

    #[test]
    fn object_path_uses_image_folder() {
        let upload = ImageUpload::from_file_name("cake.webp", None, vec![]);
        let name = Uuid::nil();

        assert_eq!(
            upload.object_path(name),
            "events/00000000-0000-0000-0000-000000000000.webp"
        );
    }

    #[test]
    fn object_path_from_public_url() {
        let url = "https://store.example/storage/v1/object/public/upload/events/a.png";

        assert_eq!(object_path_from_url(url, "upload"), Some("events/a.png"));
        assert_eq!(object_path_from_url(url, "other"), None);
        assert_eq!(object_path_from_url("https://cdn.example/upload/", "upload"), None);
    }
}
