//! Analysis backend abstraction and its HTTP implementation

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::model::{AnalysisResult, AnalyzeRequest, AnalyzeResponse, StoredAnalysis};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

/// Something that can analyze a batch of symbols
///
/// [`HttpBackend`] talks to the real service; tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Analyze every symbol in `request` in one call
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse>;

    /// Analyses the backend has stored from earlier runs
    async fn stored_analyses(&self) -> Result<Vec<StoredAnalysis>>;
}

/// Backend reached over HTTP with JSON bodies
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    analyze_url: Url,
    results_url: Url,
}

impl HttpBackend {
    /// Create a backend from a validated configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            analyze_url: config.analyze_url()?,
            results_url: config.results_url()?,
        })
    }

    pub fn analyze_url(&self) -> &Url {
        &self.analyze_url
    }

    /// Read the body, turning non-2xx statuses into [`ClientError::Status`]
    async fn read_body(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl AnalysisBackend for HttpBackend {
    #[instrument(skip(self, request), fields(url = %self.analyze_url, symbols = request.company_ids.len()))]
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse> {
        debug!("Sending analysis request");

        let response = self
            .client
            .post(self.analyze_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let body = Self::read_body(response).await?;
        let decoded = decode_analyze_body(&body)?;

        debug!(
            status = decoded.status.as_deref().unwrap_or("-"),
            count = decoded.results.len(),
            "Received analysis response"
        );
        Ok(decoded)
    }

    #[instrument(skip(self), fields(url = %self.results_url))]
    async fn stored_analyses(&self) -> Result<Vec<StoredAnalysis>> {
        debug!("Fetching stored analyses");

        let response = self.client.get(self.results_url.clone()).send().await?;
        let body = Self::read_body(response).await?;
        decode_stored_body(&body)
    }
}

/// Decode a successful `/api/analyze/` body.
///
/// Only `results` is required. `status` and `count` are read when they have
/// the expected type and ignored otherwise. A single entry that does not fit
/// [`AnalysisResult`] rejects the whole body.
pub fn decode_analyze_body(body: &str) -> Result<AnalyzeResponse> {
    let value: Value = serde_json::from_str(body)?;
    let results: Vec<AnalysisResult> = take_results(&value)?;

    let count = value
        .get("count")
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok());
    if let Some(count) = count {
        if count != results.len() {
            debug!(count, received = results.len(), "count does not match results");
        }
    }

    Ok(AnalyzeResponse {
        status: value.get("status").and_then(Value::as_str).map(str::to_string),
        count,
        results,
    })
}

/// Decode a successful `/api/results/` body
pub fn decode_stored_body(body: &str) -> Result<Vec<StoredAnalysis>> {
    let value: Value = serde_json::from_str(body)?;
    take_results(&value)
}

fn take_results<T: serde::de::DeserializeOwned>(value: &Value) -> Result<Vec<T>> {
    match value.get("results") {
        None | Some(Value::Null) => Err(ClientError::MissingResults),
        Some(results) => serde_json::from_value(results.clone())
            .map_err(|e| ClientError::MalformedResults(e.to_string())),
    }
}
