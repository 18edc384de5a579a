use std::time::Duration;

use image::DynamicImage;
use reqwest::{Client, Method, StatusCode};

use crate::error::ProbeError;

/// Cap on downloaded image payloads. Logos are small; anything larger is a
/// mislabeled asset we refuse to buffer.
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// HTTP collaborator for favicon existence checks and logo pixel fetches.
///
/// Every request is bounded by the timeout configured at construction, so a
/// stalled host degrades a single probe instead of blocking the extraction.
pub struct ProbeClient {
    client: Client,
}

impl ProbeClient {
    /// Creates a `ProbeClient` with the given per-request timeout and
    /// `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Best-effort existence check for `url`.
    ///
    /// Issues a HEAD request; servers that reject HEAD (405/501) get a GET
    /// retry. Any transport error or non-success status counts as absent —
    /// this method never fails.
    pub async fn exists(&self, url: &str) -> bool {
        match self.status_of(Method::HEAD, url).await {
            Ok(status) if status.is_success() => true,
            Ok(status)
                if status == StatusCode::METHOD_NOT_ALLOWED
                    || status == StatusCode::NOT_IMPLEMENTED =>
            {
                match self.status_of(Method::GET, url).await {
                    Ok(status) => status.is_success(),
                    Err(e) => {
                        tracing::debug!(url, error = %e, "favicon GET probe failed");
                        false
                    }
                }
            }
            Ok(status) => {
                tracing::debug!(url, status = status.as_u16(), "favicon probe rejected");
                false
            }
            Err(e) => {
                tracing::debug!(url, error = %e, "favicon HEAD probe failed");
                false
            }
        }
    }

    async fn status_of(&self, method: Method, url: &str) -> Result<StatusCode, reqwest::Error> {
        let response = self.client.request(method, url).send().await?;
        Ok(response.status())
    }

    /// Downloads and decodes an image.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] on transport failure, non-2xx status, oversized
    /// payload, or undecodable bytes. Callers treat all of these as "no logo
    /// colors", never as a fatal extraction error.
    pub async fn fetch_image(&self, url: &str) -> Result<DynamicImage, ProbeError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ProbeError::PayloadTooLarge {
                url: url.to_string(),
                limit: MAX_IMAGE_BYTES,
            });
        }

        image::load_from_memory(&bytes).map_err(|source| ProbeError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
