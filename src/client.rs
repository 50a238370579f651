//! Top-level API client

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpClient, Transport};
use crate::services::{BlockService, WebhookService};
use std::sync::Arc;

/// Entry point for the API
///
/// Owns the [`HttpClient`] shared by every service. Services borrow it, so
/// they are created on demand:
///
/// ```rust,ignore
/// let client = Client::from_env()?;
/// let block = client.blocks().get("BLC123", RequestOptions::new()).await?;
/// ```
#[derive(Debug)]
pub struct Client {
    http: HttpClient,
}

impl Client {
    /// Create a client backed by reqwest
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// Create a client from `GOCARDLESS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Create a client over a custom transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self {
            http: HttpClient::with_transport(config, transport)?,
        })
    }

    /// Blocks service
    pub fn blocks(&self) -> BlockService<'_> {
        BlockService::new(&self.http)
    }

    /// Webhooks service
    pub fn webhooks(&self) -> WebhookService<'_> {
        WebhookService::new(&self.http)
    }

    /// The underlying executor
    pub fn http(&self) -> &HttpClient {
        &self.http
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_client_rejects_empty_token() {
        let err = Client::new(ClientConfig::new("")).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));
    }

    #[test]
    fn test_client_exposes_config() {
        let config = ClientConfig::builder("token").endpoint("https://api.test").build();
        let client = Client::new(config).unwrap();
        assert_eq!(client.http().config().endpoint(), "https://api.test");
    }
}
