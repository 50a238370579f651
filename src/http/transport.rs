//! Transport layer
//!
//! A [`Transport`] performs exactly one HTTP round trip. It knows nothing about
//! retries, envelopes or idempotency; those live in
//! [`HttpClient`](super::HttpClient). Requests and responses cross this seam as
//! plain data so a transport can be swapped for a scripted one in tests.

use crate::config::ClientConfig;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use std::time::Duration;
use url::Url;

/// A fully built HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// Serialized JSON body
    pub body: Option<String>,
    pub timeout: Duration,
}

impl HttpRequest {
    /// Header value as a string, if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A raw HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a single HTTP round trip
///
/// Implementations must be safe to share between concurrent calls. A
/// connection-level failure is reported as an error; any response that was
/// received, whatever its status, is returned as `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the response
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Default transport backed by a reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport using the timeout and user agent from the config
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http.timeout())
            .user_agent(config.user_agent())
            .build()?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut req = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone())
            .timeout(request.timeout);

        if let Some(ref body) = request.body {
            req = req.body(body.clone());
        }

        let response = req.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}
