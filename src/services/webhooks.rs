//! Webhooks
//!
//! Records of webhook deliveries the API has attempted, with the request it
//! sent and the response it got back.

use crate::error::Result;
use crate::http::{ApiRequest, HttpClient, RequestOptions, ResultKey};
use crate::pagination::{CursorPage, ListMeta, ListParams, Paginator};
use crate::types::{is_false, is_zero, null_as_default, ValueMap};
use serde::{Deserialize, Serialize};

const WEBHOOKS: &str = "webhooks";

/// Webhook resource
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Webhook {
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub is_test: bool,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub request_body: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "ValueMap::is_empty")]
    pub request_headers: ValueMap,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub response_body: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub response_body_truncated: bool,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub response_code: u16,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "ValueMap::is_empty")]
    pub response_headers: ValueMap,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub response_headers_content_truncated: bool,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub response_headers_count_truncated: bool,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub successful: bool,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub url: String,
}

/// Timestamp range filter on `created_at`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreatedAtFilter {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gt: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gte: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub lt: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub lte: String,
}

impl CreatedAtFilter {
    /// Check if no bound is set
    pub fn is_empty(&self) -> bool {
        self.gt.is_empty() && self.gte.is_empty() && self.lt.is_empty() && self.lte.is_empty()
    }
}

/// Parameters for [`WebhookService::list`] and [`WebhookService::all`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WebhookListParams {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub after: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub before: String,
    #[serde(default, skip_serializing_if = "CreatedAtFilter::is_empty")]
    pub created_at: CreatedAtFilter,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_test: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub limit: u32,
    #[serde(default, skip_serializing_if = "is_false")]
    pub successful: bool,
}

impl ListParams for WebhookListParams {
    fn set_after(&mut self, cursor: String) {
        self.after = cursor;
    }
}

/// A page of webhooks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WebhookListResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub webhooks: Vec<Webhook>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: ListMeta,
}

impl CursorPage for WebhookListResult {
    fn next_cursor(&self) -> Option<&str> {
        self.meta.next_cursor()
    }
}

/// Service for the webhooks endpoints
#[derive(Debug, Clone, Copy)]
pub struct WebhookService<'a> {
    client: &'a HttpClient,
}

impl<'a> WebhookService<'a> {
    pub fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Returns a cursor-paginated list of your webhooks.
    pub async fn list(
        &self,
        params: &WebhookListParams,
        options: RequestOptions,
    ) -> Result<WebhookListResult> {
        let request = ApiRequest::get([WEBHOOKS]).query(params)?.options(options);
        self.client.execute(request, ResultKey::Inline(WEBHOOKS)).await
    }

    /// Paginator over every webhook matching `params`
    pub fn all(
        &self,
        params: WebhookListParams,
    ) -> Paginator<'a, WebhookListParams, WebhookListResult> {
        Paginator::new(self.client, [WEBHOOKS], ResultKey::Inline(WEBHOOKS), params)
    }

    /// Retrieves the details of an existing webhook.
    pub async fn get(&self, id: &str, options: RequestOptions) -> Result<Webhook> {
        let request = ApiRequest::get([WEBHOOKS, id]).options(options);
        self.client.execute(request, ResultKey::Nested(WEBHOOKS)).await
    }

    /// Requests for a previous webhook to be sent again.
    pub async fn retry(&self, id: &str, options: RequestOptions) -> Result<Webhook> {
        let request = ApiRequest::post([WEBHOOKS, id, "actions", "retry"]).options(options);
        self.client.execute(request, ResultKey::Nested(WEBHOOKS)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::encode_query;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_list_params_nested_created_at() {
        let params = WebhookListParams {
            created_at: CreatedAtFilter {
                gte: "2024-01-01T00:00:00Z".to_string(),
                ..Default::default()
            },
            successful: true,
            limit: 25,
            ..Default::default()
        };

        let query = encode_query(&params).unwrap();
        assert_eq!(
            query,
            vec![
                (
                    "created_at[gte]".to_string(),
                    "2024-01-01T00:00:00Z".to_string()
                ),
                ("limit".to_string(), "25".to_string()),
                ("successful".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_webhook_decodes_headers() {
        let webhook: Webhook = serde_json::from_value(json!({
            "id": "WB123",
            "is_test": false,
            "successful": true,
            "response_code": 200,
            "request_headers": {"Content-Type": "application/json"},
            "response_headers": null,
            "url": "https://example.com/webhooks"
        }))
        .unwrap();

        assert_eq!(webhook.id, "WB123");
        assert_eq!(webhook.response_code, 200);
        assert_eq!(webhook.request_headers["Content-Type"], "application/json");
        assert!(webhook.response_headers.is_empty());
    }
}
