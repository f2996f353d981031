use async_trait::async_trait;

use super::error::MediaError;
use super::hash::ContentHash;
use crate::customization::MediaKind;

/// A file handed over by an operator.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Where an upload ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    /// Stable public URL; the same bytes always map to the same URL.
    pub url: String,
    pub hash: ContentHash,
    pub kind: MediaKind,
    pub size: u64,
}

/// Storage for campaign media. The engine only keeps the returned URLs.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn store(&self, upload: MediaUpload) -> Result<StoredMedia, MediaError>;
}
