//! Common types used throughout the client
//!
//! This module contains shared type definitions, type aliases,
//! and the zero-value predicates used by serde to omit unset fields.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and JSON values
pub type ValueMap = HashMap<String, JsonValue>;

// ============================================================================
// Backoff Type
// ============================================================================

/// Backoff strategy between retry attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Environment
// ============================================================================

/// API environment, which determines the default endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Production API
    #[default]
    Live,
    /// Sandbox API for testing integrations
    Sandbox,
}

impl Environment {
    /// Base URL for this environment
    pub fn endpoint(self) -> &'static str {
        match self {
            Environment::Live => "https://api.gocardless.com",
            Environment::Sandbox => "https://api-sandbox.gocardless.com",
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(Environment::Live),
            "sandbox" => Ok(Environment::Sandbox),
            other => Err(crate::Error::config(format!(
                "unknown environment '{other}', expected 'live' or 'sandbox'"
            ))),
        }
    }
}

// ============================================================================
// Zero-value predicates
// ============================================================================

// Fields equal to their zero value are never sent. The API treats them as
// unset, so callers cannot distinguish "unset" from "zero".

/// `skip_serializing_if` predicate for `false`
#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// `skip_serializing_if` predicate for numeric zero
pub(crate) fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Deserialize `null` as the type's default value
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
