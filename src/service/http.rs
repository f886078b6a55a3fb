//! Multipart POST to the augmentation service

use async_trait::async_trait;
use url::Url;

use super::{AugmentService, SubmissionPayload};
use crate::config::ServiceConfig;
use crate::error::{Error, Result};

/// Longest response body kept for diagnostics on a failed request
const MAX_ERROR_BODY_CHARS: usize = 512;

/// reqwest-backed [`AugmentService`]
#[derive(Clone, Debug)]
pub struct HttpAugmentService {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpAugmentService {
    /// Build a client honoring the configured timeout
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Endpoint requests are sent to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AugmentService for HttpAugmentService {
    async fn augment(&self, payload: SubmissionPayload) -> Result<Vec<u8>> {
        let entries = payload.len();
        let total_bytes = payload.total_bytes();
        let form = payload.into_form()?;

        tracing::debug!(
            endpoint = %self.endpoint,
            entries,
            total_bytes,
            "sending augmentation request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                let error_msg = if e.is_timeout() {
                    format!("Timeout waiting for augmentation service at '{}'", self.endpoint)
                } else if e.is_connect() {
                    format!("Connection failed for '{}': {}", self.endpoint, e)
                } else {
                    format!("Failed to send augmentation request to '{}': {}", self.endpoint, e)
                };
                Error::Transport(error_msg)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ServiceStatus {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            Error::Transport(format!(
                "Failed to read response body from '{}': {}",
                self.endpoint, e
            ))
        })?;

        Ok(bytes.to_vec())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
