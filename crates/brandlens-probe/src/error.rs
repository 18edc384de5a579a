use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("image payload from {url} exceeds {limit} bytes")]
    PayloadTooLarge { url: String, limit: usize },

    #[error("image decode error for {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: image::ImageError,
    },
}
