//! Query string encoding
//!
//! Parameter structs are serialized with serde and flattened into key/value
//! pairs. Zero values (`""`, `0`, `false`, `null`) are dropped, nested
//! objects become `parent[child]` keys and arrays repeat their key.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::Serialize;

/// Encode a parameter struct into sorted query pairs
pub fn encode_query<P: Serialize + ?Sized>(params: &P) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();

    match serde_json::to_value(params)? {
        JsonValue::Object(map) => {
            for (key, value) in map {
                flatten(key, value, &mut pairs);
            }
        }
        JsonValue::Null => {}
        other => {
            return Err(Error::encode(format!(
                "query parameters must serialize to an object, got {other}"
            )))
        }
    }

    // stable, so repeated array keys keep their order
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(pairs)
}

fn flatten(key: String, value: JsonValue, pairs: &mut Vec<(String, String)>) {
    match value {
        JsonValue::Null | JsonValue::Bool(false) => {}
        JsonValue::Bool(true) => pairs.push((key, "true".to_string())),
        JsonValue::Number(n) => {
            if !matches!(n.as_f64(), Some(f) if f == 0.0) {
                pairs.push((key, n.to_string()));
            }
        }
        JsonValue::String(s) => {
            if !s.is_empty() {
                pairs.push((key, s));
            }
        }
        JsonValue::Array(items) => {
            for item in items {
                flatten(key.clone(), item, pairs);
            }
        }
        JsonValue::Object(map) => {
            for (child, value) in map {
                flatten(format!("{key}[{child}]"), value, pairs);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test_case(json!({"after": ""}) ; "empty string")]
    #[test_case(json!({"limit": 0}) ; "zero integer")]
    #[test_case(json!({"ratio": 0.0}) ; "zero float")]
    #[test_case(json!({"is_test": false}) ; "false")]
    #[test_case(json!({"before": null}) ; "null")]
    #[test_case(json!({"created_at": {"gt": "", "lt": ""}}) ; "empty nested object")]
    #[test_case(json!({"ids": []}) ; "empty array")]
    fn test_zero_values_omitted(params: JsonValue) {
        assert!(encode_query(&params).unwrap().is_empty());
    }

    #[test]
    fn test_scalars_encoded() {
        let encoded = encode_query(&json!({
            "limit": 50,
            "successful": true,
            "block_type": "email",
        }))
        .unwrap();

        assert_eq!(
            encoded,
            pairs(&[
                ("block_type", "email"),
                ("limit", "50"),
                ("successful", "true"),
            ])
        );
    }

    #[test]
    fn test_nested_object_uses_brackets() {
        let encoded = encode_query(&json!({
            "created_at": {"gte": "2024-01-01T00:00:00Z", "lt": "2024-02-01T00:00:00Z"},
        }))
        .unwrap();

        assert_eq!(
            encoded,
            pairs(&[
                ("created_at[gte]", "2024-01-01T00:00:00Z"),
                ("created_at[lt]", "2024-02-01T00:00:00Z"),
            ])
        );
    }

    #[test]
    fn test_array_repeats_key() {
        let encoded = encode_query(&json!({"id": ["BL2", "BL1"]})).unwrap();
        assert_eq!(encoded, pairs(&[("id", "BL2"), ("id", "BL1")]));
    }

    #[test]
    fn test_unit_encodes_nothing() {
        assert!(encode_query(&()).unwrap().is_empty());
    }

    #[test]
    fn test_non_object_rejected() {
        let err = encode_query(&"limit=10").unwrap_err();
        assert!(matches!(err, Error::Encode { .. }));
    }
}
