use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("snapshot contract violation: {reason}")]
    Snapshot { reason: String },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
