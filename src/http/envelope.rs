//! Response envelope decoding
//!
//! Every response body is a JSON object holding either an `error` object or a
//! resource key. Which one is present decides the variant.

use crate::error::{ApiError, Error, Result};
use crate::types::JsonValue;
use serde::de::DeserializeOwned;

/// Where the payload lives in a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKey {
    /// Payload is the value under the key, e.g. `{"blocks": {...}}`
    Nested(&'static str),
    /// Key must be present, payload is the whole object, e.g.
    /// `{"blocks": [...], "meta": {...}}`
    Inline(&'static str),
}

impl ResultKey {
    /// The JSON key that marks a successful response
    pub fn key(self) -> &'static str {
        match self {
            ResultKey::Nested(key) | ResultKey::Inline(key) => key,
        }
    }
}

/// A decoded response: either a structured API error or the payload
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Error(ApiError),
    Payload(T),
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode a response body
    ///
    /// A non-null `error` takes precedence over the payload. A body with
    /// neither fails with [`Error::MissingResult`].
    pub fn decode(body: JsonValue, key: ResultKey) -> Result<Self> {
        let JsonValue::Object(mut map) = body else {
            return Err(Error::missing_result(key.key()));
        };

        if let Some(error) = map.remove("error").filter(|v| !v.is_null()) {
            let error: ApiError = serde_json::from_value(error)
                .map_err(|e| Error::decode(format!("invalid error object: {e}")))?;
            return Ok(Envelope::Error(error));
        }

        let payload = match key {
            ResultKey::Nested(name) => match map.remove(name) {
                Some(value) if !value.is_null() => value,
                _ => return Err(Error::missing_result(name)),
            },
            ResultKey::Inline(name) => {
                if !map.get(name).is_some_and(|v| !v.is_null()) {
                    return Err(Error::missing_result(name));
                }
                JsonValue::Object(map)
            }
        };

        serde_json::from_value(payload)
            .map(Envelope::Payload)
            .map_err(|e| Error::decode(format!("invalid `{}` payload: {e}", key.key())))
    }
}

impl<T> Envelope<T> {
    /// Convert into a result, surfacing the API error as [`Error::Api`]
    pub fn into_result(self) -> Result<T> {
        match self {
            Envelope::Error(err) => Err(Error::Api(err)),
            Envelope::Payload(payload) => Ok(payload),
        }
    }

    /// Check if this is an error envelope
    pub fn is_error(&self) -> bool {
        matches!(self, Envelope::Error(_))
    }
}
