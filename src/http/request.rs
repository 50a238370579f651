//! Request descriptors and per-call options

use super::query::encode_query;
use crate::error::{Error, Result};
use crate::types::JsonValue;
use reqwest::Method;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Header carrying the pinned API version
pub const VERSION_HEADER: &str = "GoCardless-Version";
/// API version this client is written against
pub const API_VERSION: &str = "2015-07-06";
/// Header identifying the client library
pub const CLIENT_LIBRARY_HEADER: &str = "GoCardless-Client-Library";
/// Header identifying the client library version
pub const CLIENT_VERSION_HEADER: &str = "GoCardless-Client-Version";
/// Header carrying the idempotency key on writes
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Generate a fresh idempotency key
pub fn new_idempotency_key() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ============================================================================
// Request Options
// ============================================================================

/// Per-call overrides
///
/// Every field is optional. Unset fields fall back to the client config:
/// `retries` to `http.retries` (3 by default), `timeout` to
/// `http.timeout_seconds`. A write without an idempotency key gets a freshly
/// generated one. Headers are applied after the standard headers, in order,
/// and replace any header of the same name.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Total attempts for this call
    pub retries: Option<u32>,
    /// Idempotency key for writes
    pub idempotency_key: Option<String>,
    /// Header overrides
    pub headers: Vec<(String, String)>,
    /// Timeout for each attempt
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set total attempts
    #[must_use]
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    /// Set the idempotency key
    #[must_use]
    pub fn idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Add a header override
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

// ============================================================================
// API Request
// ============================================================================

/// Description of one API call
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path segments appended to the endpoint, unescaped
    pub path: Vec<String>,
    /// Encoded query pairs
    pub query: Vec<(String, String)>,
    pub body: Option<JsonValue>,
    pub options: RequestOptions,
}

impl ApiRequest {
    /// Create a request for the given method and path segments
    pub fn new<I, S>(method: Method, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            path: path.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
            options: RequestOptions::default(),
        }
    }

    /// Create a GET request
    pub fn get<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, path)
    }

    /// Create a POST request
    pub fn post<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::POST, path)
    }

    /// Encode list or filter parameters into the query string
    pub fn query<P: Serialize + ?Sized>(mut self, params: &P) -> Result<Self> {
        self.query = encode_query(params)?;
        Ok(self)
    }

    /// Set the body to `{ key: params }`
    pub fn json_body<P: Serialize + ?Sized>(mut self, key: &str, params: &P) -> Result<Self> {
        let mut wrapper = serde_json::Map::new();
        wrapper.insert(key.to_string(), serde_json::to_value(params)?);
        self.body = Some(JsonValue::Object(wrapper));
        Ok(self)
    }

    /// Attach per-call options
    #[must_use]
    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Whether this call creates, updates or acts on a resource
    pub fn is_write(&self) -> bool {
        !matches!(self.method, Method::GET | Method::HEAD | Method::OPTIONS)
    }

    /// Resolve the full URL against an endpoint
    pub fn url(&self, endpoint: &str) -> Result<Url> {
        let mut url = Url::parse(endpoint)?;
        url.path_segments_mut()
            .map_err(|()| {
                Error::config(format!("endpoint '{endpoint}' cannot be used as a base URL"))
            })?
            .pop_if_empty()
            .extend(&self.path);

        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }
}
