//! Open Trivia DB question source.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use quizclock_core::model::{Question, QuestionPayload};
use quizclock_core::traits::QuestionSource;

use crate::error::SourceError;

pub const DEFAULT_BASE_URL: &str = "https://opentdb.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches questions from `GET {base_url}/api.php?amount={count}`.
pub struct OpenTdbSource {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl OpenTdbSource {
    pub fn new(base_url: Option<String>, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SourceError::NetworkError(format!("failed to build HTTP client: {e}")))?;

        let base_url = base_url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the raw payload, mapping every failure to a [`SourceError`].
    pub async fn fetch_payload(&self, count: usize) -> Result<QuestionPayload, SourceError> {
        let response = self
            .client
            .get(format!("{}/api.php?amount={count}", self.base_url))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SourceError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    SourceError::NetworkError(format!(
                        "question source not reachable at {}",
                        self.base_url
                    ))
                } else {
                    SourceError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::ApiError {
                status,
                message: body,
            });
        }

        let payload: QuestionPayload = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        if let Some(err) = SourceError::from_response_code(payload.response_code) {
            return Err(err);
        }
        Ok(payload)
    }
}

#[async_trait]
impl QuestionSource for OpenTdbSource {
    fn name(&self) -> &str {
        "opentdb"
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch(&self, count: usize) -> anyhow::Result<Vec<Question>> {
        let payload = self.fetch_payload(count).await?;
        tracing::debug!(received = payload.results.len(), "questions fetched");
        Ok(payload.results)
    }
}
