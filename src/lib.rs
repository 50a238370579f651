// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # GoCardless API client
//!
//! Typed async client for the GoCardless blocks and webhooks endpoints.
//!
//! ## Features
//!
//! - **Typed Resources**: request parameters and results as plain structs
//! - **Automatic Retries**: bounded retries with backoff, one idempotency key
//!   per logical write
//! - **Cursor Pagination**: page-by-page [`Paginator`] or a `Stream` of pages
//! - **Pluggable Transport**: reqwest by default, any [`http::Transport`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use gocardless_client::{BlockListParams, Client, RequestOptions, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Reads GOCARDLESS_ACCESS_TOKEN and GOCARDLESS_ENVIRONMENT
//!     let client = Client::from_env()?;
//!
//!     let block = client.blocks().get("BLC123", RequestOptions::new()).await?;
//!
//!     let mut pages = client.blocks().all(BlockListParams::default()).into_stream();
//!     while let Some(page) = pages.try_next().await? {
//!         for block in page.blocks {
//!             println!("{}", block.id);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            Client                               │
//! │        blocks() → BlockService    webhooks() → WebhookService   │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌───────────────┬──────────────┴─────┬────────────────────────────┐
//! │   Services    │     Pagination     │            HTTP            │
//! ├───────────────┼────────────────────┼────────────────────────────┤
//! │ create / get  │ PageState          │ Query encoding             │
//! │ list / all    │ Paginator::fetch   │ Headers / idempotency      │
//! │ actions       │ into_stream        │ Retry + backoff            │
//! │               │                    │ Envelope decoding          │
//! └───────────────┴────────────────────┴────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Document resource fields before 1.0 release

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// HTTP execution with retries and envelope decoding
pub mod http;

/// Cursor pagination
pub mod pagination;

/// Resource services
pub mod services;

/// Top-level client
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{ApiError, Error, FieldError, Result};
pub use types::*;

// Re-export commonly used types
pub use client::Client;
pub use config::{BackoffConfig, ClientConfig, ClientConfigBuilder, HttpConfig};
pub use http::RequestOptions;
pub use pagination::{PageState, Paginator};
pub use services::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
