use raffle_common::MediaKind;
use raffle_common::media::StoredMedia;
use serde::Serialize;

#[derive(Serialize, utoipa::ToSchema)]
pub struct MediaResponse {
    /// Stable URL to reference from customizations.
    #[schema(example = "/media/9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08.png")]
    pub url: String,
    /// SHA-256 of the content.
    pub hash: String,
    pub kind: MediaKind,
    pub size: u64,
}

impl From<StoredMedia> for MediaResponse {
    fn from(m: StoredMedia) -> Self {
        Self {
            url: m.url,
            hash: m.hash.to_hex(),
            kind: m.kind,
            size: m.size,
        }
    }
}
