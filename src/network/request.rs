//! Request, response and per-call option types

use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// GET request to be made on behalf of a data source
#[derive(Debug, Clone)]
pub struct SourceRequest {
    /// URL to request
    pub url: String,
    /// Query parameters, sent in order
    pub params: Vec<(String, String)>,
}

impl SourceRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: Vec::new(),
        }
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Look up the first value of a query parameter
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP response from a source request
#[derive(Debug)]
pub struct SourceResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
}

impl SourceResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.text)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Options passed verbatim to every request of one operation
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Extra query parameters appended to each request
    pub params: Vec<(String, String)>,
    /// Overrides the client's default timeout
    pub timeout: Option<Duration>,
    /// Caller-owned cancellation
    pub abort: Option<CancellationToken>,
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an extra query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attach a cancellation token
    pub fn with_abort(mut self, token: CancellationToken) -> Self {
        self.abort = Some(token);
        self
    }

    /// Whether the attached token has already been cancelled
    pub fn is_aborted(&self) -> bool {
        self.abort.as_ref().is_some_and(|t| t.is_cancelled())
    }
}
