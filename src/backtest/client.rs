//! HTTP client for the backtest endpoint

use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::common::errors::{ProbeError, Result};
use crate::config::types::{TargetConfig, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::strategy::Strategy;

/// Client that submits strategies to a single backtest endpoint
#[derive(Debug, Clone)]
pub struct BacktestClient {
    /// HTTP client
    client: Client,
    /// Endpoint URL, used verbatim (trailing slash is significant)
    url: Url,
    /// Whole-request timeout
    timeout: Duration,
}

impl BacktestClient {
    /// Create a new client with the default 30 second timeout
    pub fn new(url: &str) -> Result<Self> {
        Self::with_timeout(url, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    /// Create a new client with custom timeout
    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| ProbeError::Configuration(format!("Invalid target url '{}': {}", url, e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProbeError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            url,
            timeout,
        })
    }

    /// Create a client from the target section of the configuration
    pub fn from_config(config: &TargetConfig) -> Result<Self> {
        Self::with_timeout(&config.url, Duration::from_secs(config.timeout_seconds))
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POST one strategy and capture the raw response
    ///
    /// Any HTTP status is returned as `Ok`; only transport failures
    /// (connect, timeout, body read) are errors.
    #[instrument(skip(self, strategy), fields(strategy_id = %strategy.id))]
    pub async fn submit(&self, strategy: &Strategy) -> Result<BacktestResponse> {
        debug!("Submitting strategy to: {}", self.url);

        let response = self.client.post(self.url.clone()).json(strategy).send().await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.text().await?;

        debug!("Received status {} ({} bytes)", status, body.len());

        Ok(BacktestResponse {
            status,
            headers,
            body,
        })
    }
}

/// Raw response captured from the backtest endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacktestResponse {
    pub status: u16,
    /// Header name/value pairs in the order received
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl BacktestResponse {
    /// Only 200 counts as a successful backtest
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Parse the body as JSON
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Parse the body as a JSON object
    pub fn result_object(&self) -> Result<Map<String, Value>> {
        match self.json()? {
            Value::Object(map) => Ok(map),
            other => Err(ProbeError::InvalidResponse(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Headers as a JSON object; repeated names are joined with ", "
    pub fn headers_json(&self) -> Value {
        let mut map = Map::new();
        for (name, value) in &self.headers {
            match map.get_mut(name) {
                Some(Value::String(existing)) => {
                    existing.push_str(", ");
                    existing.push_str(value);
                }
                _ => {
                    map.insert(name.clone(), Value::String(value.clone()));
                }
            }
        }
        Value::Object(map)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
