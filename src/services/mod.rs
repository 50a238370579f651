//! Resource services
//!
//! One service per API resource. Services borrow the shared [`HttpClient`]
//! and are cheap to construct; get them from [`Client`](crate::Client).
//!
//! [`HttpClient`]: crate::http::HttpClient

mod blocks;
mod webhooks;

pub use blocks::{
    Block, BlockByRefParams, BlockByRefResult, BlockCreateParams, BlockListParams,
    BlockListResult, BlockService,
};
pub use webhooks::{
    CreatedAtFilter, Webhook, WebhookListParams, WebhookListResult, WebhookService,
};
