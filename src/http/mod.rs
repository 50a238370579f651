//! HTTP request execution
//!
//! Everything a resource call needs between "typed parameters" and "typed
//! result": query and body encoding, standard headers, idempotency keys, a
//! bounded retry loop and decoding of the response envelope.
//!
//! # Features
//!
//! - **Automatic Retries**: transport failures and error statuses are retried
//!   with backoff, reusing one idempotency key for every attempt
//! - **Envelope Decoding**: an `error` object fails the call even under HTTP 200
//! - **Pluggable Transport**: reqwest by default, any [`Transport`] when injected

mod client;
mod envelope;
mod query;
mod request;
mod transport;

pub use client::HttpClient;
pub use envelope::{Envelope, ResultKey};
pub use query::encode_query;
pub use request::{
    new_idempotency_key, ApiRequest, RequestOptions, API_VERSION, CLIENT_LIBRARY_HEADER,
    CLIENT_VERSION_HEADER, IDEMPOTENCY_KEY_HEADER, VERSION_HEADER,
};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
