use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::error::MediaError;
use super::hash::ContentHash;
use super::traits::{MediaStore, MediaUpload, StoredMedia};

/// Filesystem-backed media store.
///
/// Files are content-addressed: `{root}/{sha256}.{ext}`, published as
/// `{public_base_url}/{sha256}.{ext}`. Writes go through `{root}/.tmp` and an
/// atomic rename so a reader never sees a partial file.
pub struct FilesystemMediaStore {
    root: PathBuf,
    public_base_url: String,
    max_size: u64,
}

impl FilesystemMediaStore {
    pub async fn new(
        root: PathBuf,
        public_base_url: &str,
        max_size: u64,
    ) -> Result<Self, MediaError> {
        fs::create_dir_all(root.join(".tmp")).await?;
        Ok(Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            max_size,
        })
    }

    fn temp_path(&self) -> PathBuf {
        self.root
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl MediaStore for FilesystemMediaStore {
    async fn store(&self, upload: MediaUpload) -> Result<StoredMedia, MediaError> {
        let (ext, kind) = super::classify(&upload.content_type)
            .ok_or_else(|| MediaError::UnsupportedType(upload.content_type.clone()))?;

        let size = upload.data.len() as u64;
        if size == 0 {
            return Err(MediaError::Empty);
        }
        if size > self.max_size {
            return Err(MediaError::TooLarge {
                actual: size,
                limit: self.max_size,
            });
        }

        let hash = ContentHash::compute(&upload.data);
        let name = format!("{}.{ext}", hash.to_hex());
        let path = self.root.join(&name);
        let url = format!("{}/{name}", self.public_base_url);

        if fs::try_exists(&path).await? {
            debug!(%hash, filename = %upload.filename, "Media already stored");
            return Ok(StoredMedia {
                url,
                hash,
                kind,
                size,
            });
        }

        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, &upload.data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        debug!(%hash, size, filename = %upload.filename, "Media stored");
        Ok(StoredMedia {
            url,
            hash,
            kind,
            size,
        })
    }
}
