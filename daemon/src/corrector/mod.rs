mod http;

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
pub use http::HttpCorrector;
use tokio::time::{timeout, Duration};

use crate::config::{BackendConfig, CheckConfig};
use grammarlite_core::CorrectionResult;

#[async_trait]
pub trait CorrectionEngine: Send + Sync {
    /// `Ok(None)` means the backend answered but offered no correction.
    async fn correct(&self, text: &str) -> Result<Option<String>>;
}

pub struct CorrectorRouter {
    engine: Arc<dyn CorrectionEngine>,
    enabled: bool,
    request_timeout: Option<Duration>,
}

impl CorrectorRouter {
    pub fn new(backend: &BackendConfig, check: &CheckConfig) -> Result<Self> {
        let engine = Arc::new(HttpCorrector::new(backend)?);
        Ok(Self::with_engine(
            engine,
            check.enable,
            backend.request_timeout_ms,
        ))
    }

    pub fn with_engine(
        engine: Arc<dyn CorrectionEngine>,
        enabled: bool,
        request_timeout_ms: u64,
    ) -> Self {
        Self {
            engine,
            enabled,
            request_timeout: (request_timeout_ms > 0)
                .then(|| Duration::from_millis(request_timeout_ms)),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub async fn correct(&self, text: &str) -> Result<Option<CorrectionResult>> {
        if !self.enabled {
            return Ok(None);
        }

        let corrected = match self.request_timeout {
            Some(limit) => timeout(limit, self.engine.correct(text))
                .await
                .map_err(|_| anyhow!("grammar backend exceeded {}ms", limit.as_millis()))??,
            None => self.engine.correct(text).await?,
        };
        Ok(corrected.map(|corrected| CorrectionResult::new(text, corrected)))
    }
}
