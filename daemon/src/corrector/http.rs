use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::BackendConfig;
use crate::corrector::CorrectionEngine;
use crate::protocol::{CorrectRequest, CorrectResponse};

pub struct HttpCorrector {
    endpoint: String,
    client: Client,
}

impl HttpCorrector {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(anyhow!("backend.endpoint is empty"));
        }

        Ok(Self {
            endpoint: config.endpoint.trim().to_string(),
            client: Client::builder()
                .build()
                .context("failed to build HTTP client")?,
        })
    }
}

#[async_trait]
impl CorrectionEngine for HttpCorrector {
    async fn correct(&self, text: &str) -> Result<Option<String>> {
        let payload = CorrectRequest {
            text: text.to_string(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .context("failed to call grammar backend")?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "grammar backend declined request");
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .context("failed to read grammar backend response body")?;
        let parsed: CorrectResponse =
            serde_json::from_str(&body).context("invalid grammar backend response format")?;
        Ok(Some(parsed.corrected_text))
    }
}
