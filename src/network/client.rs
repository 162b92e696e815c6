//! HTTP client for the geocoder and application API

use super::request::{FetchOptions, SourceRequest, SourceResponse};
use crate::config::OutgoingSettings;
use reqwest::{header, Client, Response};
use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;

/// Used when the configured timeout is not a positive, finite number of seconds
const FALLBACK_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport-level failure of a single request
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("request aborted")]
    Aborted,

    #[error("{0}")]
    Request(reqwest::Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Request(err)
        }
    }
}

/// HTTP client wrapper configured from [`OutgoingSettings`]
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
    extra_headers: HashMap<String, String>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> reqwest::Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> reqwest::Result<Self> {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        let default_timeout = Duration::try_from_secs_f64(settings.request_timeout)
            .ok()
            .filter(|timeout| !timeout.is_zero())
            .unwrap_or_else(|| {
                warn!(
                    "Invalid request timeout {}, using {:?}",
                    settings.request_timeout, FALLBACK_TIMEOUT
                );
                FALLBACK_TIMEOUT
            });

        Ok(Self {
            client,
            default_timeout,
            extra_headers: settings.extra_headers.clone(),
        })
    }

    /// Default per-request timeout
    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Execute a source request with the caller's options applied
    pub async fn execute(
        &self,
        request: SourceRequest,
        options: &FetchOptions,
    ) -> Result<SourceResponse, TransportError> {
        if options.is_aborted() {
            return Err(TransportError::Aborted);
        }

        let timeout = options.timeout.unwrap_or(self.default_timeout);

        let mut req_builder = self
            .client
            .get(&request.url)
            .timeout(timeout)
            .header(header::ACCEPT, "application/json");

        for (key, value) in &self.extra_headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }
        if !options.params.is_empty() {
            req_builder = req_builder.query(&options.params);
        }

        let send = async {
            let response = req_builder.send().await?;
            Self::parse_response(response).await
        };

        match options.abort {
            Some(ref token) => {
                tokio::select! {
                    result = send => result,
                    _ = token.cancelled() => Err(TransportError::Aborted),
                }
            }
            None => send.await,
        }
    }

    /// Parse response into SourceResponse
    async fn parse_response(response: Response) -> Result<SourceResponse, TransportError> {
        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok(SourceResponse { status, text })
    }
}
