//! Configuration for the analysis client

use crate::error::{ClientError, Result};
use crate::state::DEFAULT_SYMBOLS;
use crate::symbol::Symbol;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Environment variable overriding [`ClientConfig::api_base`]
pub const API_BASE_ENV: &str = "BLUESTOCK_API_BASE";

const DEFAULT_API_BASE: &str = "http://localhost:8000";
const DEFAULT_ANALYZE_PATH: &str = "/api/analyze/";
const DEFAULT_RESULTS_PATH: &str = "/api/results/";

/// Configuration for talking to the analysis backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Scheme, host and port of the backend (default: `http://localhost:8000`)
    pub api_base: String,

    /// Path of the batch analysis endpoint
    pub analyze_path: String,

    /// Path listing stored analyses
    pub results_path: String,

    /// Transport timeout; `None` lets a request run to completion
    pub request_timeout: Option<Duration>,

    /// Symbols a new session starts with
    pub default_symbols: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            analyze_path: DEFAULT_ANALYZE_PATH.to_string(),
            results_path: DEFAULT_RESULTS_PATH.to_string(),
            request_timeout: None,
            default_symbols: DEFAULT_SYMBOLS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Override `api_base` from `BLUESTOCK_API_BASE` when set
    pub fn with_env(mut self) -> Self {
        if let Ok(base) = std::env::var(API_BASE_ENV) {
            self.api_base = base;
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let base = self.base_url()?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "api_base must use http or https, got '{}'",
                base.scheme()
            )));
        }

        for (name, path) in [
            ("analyze_path", &self.analyze_path),
            ("results_path", &self.results_path),
        ] {
            if !path.starts_with('/') {
                return Err(ClientError::Config(format!(
                    "{name} must start with '/', got '{path}'"
                )));
            }
        }

        if let Some(raw) = self
            .default_symbols
            .iter()
            .find(|raw| Symbol::parse(raw).is_none())
        {
            return Err(ClientError::Config(format!(
                "default symbol '{raw}' is blank"
            )));
        }

        Ok(())
    }

    /// Parsed `api_base`
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.api_base)
            .map_err(|e| ClientError::Config(format!("invalid api_base '{}': {e}", self.api_base)))
    }

    /// Full URL of the analysis endpoint, including `?format=json`
    pub fn analyze_url(&self) -> Result<Url> {
        self.endpoint(&self.analyze_path)
    }

    /// Full URL of the stored analyses listing, including `?format=json`
    pub fn results_url(&self) -> Result<Url> {
        self.endpoint(&self.results_path)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut url = self
            .base_url()?
            .join(path)
            .map_err(|e| ClientError::Config(format!("invalid path '{path}': {e}")))?;
        url.query_pairs_mut().append_pair("format", "json");
        Ok(url)
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    api_base: Option<String>,
    analyze_path: Option<String>,
    results_path: Option<String>,
    request_timeout: Option<Duration>,
    default_symbols: Option<Vec<String>>,
}

impl ClientConfigBuilder {
    /// Set the backend base URL
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Set the analysis endpoint path
    pub fn analyze_path(mut self, path: impl Into<String>) -> Self {
        self.analyze_path = Some(path.into());
        self
    }

    /// Set the stored analyses endpoint path
    pub fn results_path(mut self, path: impl Into<String>) -> Self {
        self.results_path = Some(path.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Replace the starting symbol list
    pub fn default_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_symbols = Some(symbols.into_iter().map(Into::into).collect());
        self
    }

    /// Load `api_base` from environment when not set explicitly
    pub fn with_env(mut self) -> Self {
        if self.api_base.is_none() {
            self.api_base = std::env::var(API_BASE_ENV).ok();
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ClientConfig> {
        let defaults = ClientConfig::default();

        let config = ClientConfig {
            api_base: self.api_base.unwrap_or(defaults.api_base),
            analyze_path: self.analyze_path.unwrap_or(defaults.analyze_path),
            results_path: self.results_path.unwrap_or(defaults.results_path),
            request_timeout: self.request_timeout.or(defaults.request_timeout),
            default_symbols: self.default_symbols.unwrap_or(defaults.default_symbols),
        };

        config.validate()?;
        Ok(config)
    }
}
