/// Errors that can occur while storing uploaded media.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("unsupported content type '{0}'")]
    UnsupportedType(String),
    #[error("upload is empty")]
    Empty,
    #[error("upload exceeds size limit ({actual} > {limit} bytes)")]
    TooLarge { actual: u64, limit: u64 },
    #[error("media storage IO error: {0}")]
    Io(#[from] std::io::Error),
}
