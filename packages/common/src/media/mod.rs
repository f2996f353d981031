mod error;
mod hash;
mod traits;

pub mod filesystem;

pub use error::MediaError;
pub use hash::ContentHash;
pub use traits::{MediaStore, MediaUpload, StoredMedia};

use crate::customization::MediaKind;

/// Content types accepted for upload, with the extension files are stored under.
const ACCEPTED_TYPES: &[(&str, &str, MediaKind)] = &[
    ("image/png", "png", MediaKind::Image),
    ("image/jpeg", "jpg", MediaKind::Image),
    ("image/gif", "gif", MediaKind::Image),
    ("image/webp", "webp", MediaKind::Image),
    ("video/mp4", "mp4", MediaKind::Video),
    ("video/webm", "webm", MediaKind::Video),
    ("video/quicktime", "mov", MediaKind::Video),
];

/// Map a content type to its storage extension and media kind.
pub fn classify(content_type: &str) -> Option<(&'static str, MediaKind)> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    ACCEPTED_TYPES
        .iter()
        .find(|(ty, _, _)| *ty == essence)
        .map(|(_, ext, kind)| (*ext, *kind))
}
