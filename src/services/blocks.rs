//! Blocks
//!
//! A block prevents a customer from setting up mandates, keyed by an email,
//! email domain or bank account.

use crate::error::Result;
use crate::http::{ApiRequest, HttpClient, RequestOptions, ResultKey};
use crate::pagination::{CursorPage, ListMeta, ListParams, Paginator};
use crate::types::{is_false, is_zero, null_as_default};
use serde::{Deserialize, Serialize};

const BLOCKS: &str = "blocks";

/// Block resource
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Block {
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub active: bool,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub block_type: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub reason_description: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub reason_type: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub resource_reference: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub updated_at: String,
}

/// Parameters for [`BlockService::create`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockCreateParams {
    #[serde(default, skip_serializing_if = "is_false")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub block_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason_description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_reference: String,
}

/// Parameters for [`BlockService::list`] and [`BlockService::all`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockListParams {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub after: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub before: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub block: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub block_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub limit: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub updated_at: String,
}

impl ListParams for BlockListParams {
    fn set_after(&mut self, cursor: String) {
        self.after = cursor;
    }
}

/// A page of blocks
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockListResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub blocks: Vec<Block>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: ListMeta,
}

impl CursorPage for BlockListResult {
    fn next_cursor(&self) -> Option<&str> {
        self.meta.next_cursor()
    }
}

/// Parameters for [`BlockService::block_by_ref`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockByRefParams {
    #[serde(default, skip_serializing_if = "is_false")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason_description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason_type: String,
    /// `customer` or `mandate`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reference_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reference_value: String,
}

/// Blocks created by [`BlockService::block_by_ref`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockByRefResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub blocks: Vec<Block>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: ListMeta,
}

/// Service for the blocks endpoints
#[derive(Debug, Clone, Copy)]
pub struct BlockService<'a> {
    client: &'a HttpClient,
}

impl<'a> BlockService<'a> {
    pub fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Creates a new block of a given type. By default it will be active.
    pub async fn create(&self, params: &BlockCreateParams, options: RequestOptions) -> Result<Block> {
        let request = ApiRequest::post([BLOCKS])
            .json_body(BLOCKS, params)?
            .options(options);
        self.client.execute(request, ResultKey::Nested(BLOCKS)).await
    }

    /// Retrieves the details of an existing block.
    pub async fn get(&self, id: &str, options: RequestOptions) -> Result<Block> {
        let request = ApiRequest::get([BLOCKS, id]).options(options);
        self.client.execute(request, ResultKey::Nested(BLOCKS)).await
    }

    /// Returns a cursor-paginated list of your blocks.
    pub async fn list(
        &self,
        params: &BlockListParams,
        options: RequestOptions,
    ) -> Result<BlockListResult> {
        let request = ApiRequest::get([BLOCKS]).query(params)?.options(options);
        self.client.execute(request, ResultKey::Inline(BLOCKS)).await
    }

    /// Paginator over every block matching `params`
    pub fn all(&self, params: BlockListParams) -> Paginator<'a, BlockListParams, BlockListResult> {
        Paginator::new(self.client, [BLOCKS], ResultKey::Inline(BLOCKS), params)
    }

    /// Disables a block so that it no longer will prevent mandate creation.
    pub async fn disable(&self, id: &str, options: RequestOptions) -> Result<Block> {
        let request = ApiRequest::post([BLOCKS, id, "actions", "disable"]).options(options);
        self.client.execute(request, ResultKey::Nested(BLOCKS)).await
    }

    /// Enables a previously disabled block so that it will prevent mandate
    /// creation.
    pub async fn enable(&self, id: &str, options: RequestOptions) -> Result<Block> {
        let request = ApiRequest::post([BLOCKS, id, "actions", "enable"]).options(options);
        self.client.execute(request, ResultKey::Nested(BLOCKS)).await
    }

    /// Creates new blocks for a given reference. By default blocks will be
    /// active. The API answers 201 when at least one block was created and
    /// 200 when none were.
    pub async fn block_by_ref(
        &self,
        params: &BlockByRefParams,
        options: RequestOptions,
    ) -> Result<BlockByRefResult> {
        let request = ApiRequest::post(["block_by_ref"])
            .json_body("data", params)?
            .options(options);
        self.client.execute(request, ResultKey::Inline(BLOCKS)).await
    }
}
