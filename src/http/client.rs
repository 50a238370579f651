//! HTTP client with retry and envelope decoding
//!
//! Provides the request executor used by every service:
//! - Standard headers plus per-call overrides
//! - Idempotency keys on writes, shared by every retry attempt
//! - Automatic retries with configurable backoff
//! - Error classification for retry decisions

use super::envelope::{Envelope, ResultKey};
use super::request::{
    new_idempotency_key, ApiRequest, API_VERSION, CLIENT_LIBRARY_HEADER, CLIENT_VERSION_HEADER,
    IDEMPOTENCY_KEY_HEADER, VERSION_HEADER,
};
use super::transport::{HttpRequest, ReqwestTransport, Transport};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::JsonValue;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Request executor
///
/// Cheap to share by reference; holds no per-call state.
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    config: ClientConfig,
}

impl HttpClient {
    /// Create a client using the default reqwest transport
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self {
            transport: Arc::new(transport),
            config,
        })
    }

    /// Create a client with an injected transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        Ok(Self { transport, config })
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute a request and decode the payload at `key`
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest, key: ResultKey) -> Result<T> {
        let body = self.send(&request).await?;
        Envelope::decode(body, key)?.into_result()
    }

    /// Execute a request with retries and return the JSON body of the
    /// successful response
    pub async fn send(&self, request: &ApiRequest) -> Result<JsonValue> {
        let idempotency_key = request.is_write().then(|| {
            request
                .options
                .idempotency_key
                .clone()
                .unwrap_or_else(new_idempotency_key)
        });

        let http_request = HttpRequest {
            method: request.method.clone(),
            url: request.url(self.config.endpoint())?,
            headers: self.build_headers(request, idempotency_key.as_deref())?,
            body: request
                .body
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
            timeout: request
                .options
                .timeout
                .unwrap_or_else(|| self.config.http.timeout()),
        };

        let max_attempts = request
            .options
            .retries
            .unwrap_or(self.config.http.retries)
            .max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self.attempt(&http_request).await {
                Ok(body) => {
                    debug!(
                        "Request succeeded: {} {}",
                        http_request.method, http_request.url
                    );
                    return serde_json::from_str(&body).map_err(|e| Error::decode(e.to_string()));
                }
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    let delay = self.calculate_backoff(attempt - 1);
                    warn!(
                        "Request failed: {}, attempt {}/{}, retrying in {:?}",
                        e, attempt, max_attempts, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// One round trip; non-2xx statuses become errors
    async fn attempt(&self, request: &HttpRequest) -> Result<String> {
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(Error::http_status(response.status, response.body));
        }
        Ok(response.body)
    }

    /// Standard headers, write headers, then caller overrides
    fn build_headers(&self, request: &ApiRequest, idempotency_key: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        let bearer = format!("Bearer {}", self.config.access_token);
        insert(&mut headers, AUTHORIZATION.as_str(), &bearer)?;
        insert(&mut headers, VERSION_HEADER, API_VERSION)?;
        insert(&mut headers, CLIENT_LIBRARY_HEADER, crate::NAME)?;
        insert(&mut headers, CLIENT_VERSION_HEADER, crate::VERSION)?;
        insert(&mut headers, USER_AGENT.as_str(), &self.config.user_agent())?;

        if let Some(key) = idempotency_key {
            insert(&mut headers, CONTENT_TYPE.as_str(), "application/json")?;
            insert(&mut headers, IDEMPOTENCY_KEY_HEADER, key)?;
        }

        for (name, value) in &request.options.headers {
            insert(&mut headers, name, value)?;
        }

        Ok(headers)
    }

    /// Calculate backoff delay for a given zero-based attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        self.config.http.retry_backoff.delay(attempt)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Insert a header, replacing any existing value of the same name
fn insert(headers: &mut HeaderMap, name: &str, value: &str) -> Result<()> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| Error::encode(format!("invalid header name '{name}': {e}")))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|e| Error::encode(format!("invalid value for header '{name}': {e}")))?;
    headers.insert(header_name, header_value);
    Ok(())
}
