//! Deterministic cache key derivation.

use serde::Serialize;
use serde_json::{Map, Value};

/// Builds the cache key for an operation and its parameters.
///
/// Parameters go through [`serde_json::Value`] first and every object is
/// rebuilt with its fields in sorted order, so two parameter objects that
/// differ only in field order produce the same key. Sorting is done here
/// rather than relying on `serde_json`'s default map type, which changes when
/// another crate in the build enables `preserve_order`.
///
/// Format: `<operation>:<canonical json>`, e.g.
/// `workspace.getDashboardStats:{"user_id":"…"}`.
///
/// # Errors
///
/// Fails when the parameters cannot be represented as JSON (for example a
/// map with non-string keys).
pub fn derive_key<P>(operation: &str, params: &P) -> Result<String, serde_json::Error>
where
    P: Serialize + ?Sized,
{
    let canonical = canonicalize(serde_json::to_value(params)?);
    Ok(format!("{}:{}", operation, canonical))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut fields: Vec<(String, Value)> = map.into_iter().collect();
            fields.sort_by(|(a, _), (b, _)| a.cmp(b));

            let mut sorted = Map::new();
            for (key, value) in fields {
                sorted.insert(key, canonicalize(value));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Returns the namespace of an operation: everything before the first `.`.
///
/// Used as a metrics label, e.g. `ideaVault` for `ideaVault.getIdeas`.
pub fn namespace_of(operation: &str) -> &str {
    operation.split_once('.').map_or(operation, |(ns, _)| ns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Serialize)]
    struct Ab {
        a: u32,
        b: &'static str,
    }

    #[derive(Serialize)]
    struct Ba {
        b: &'static str,
        a: u32,
    }

    #[test]
    fn test_key_contains_operation_and_params() {
        let key = derive_key("ideaVault.getIdeas", &json!({"user_id": "u1"})).unwrap();
        assert_eq!(key, r#"ideaVault.getIdeas:{"user_id":"u1"}"#);
    }

    #[test]
    fn test_field_order_does_not_change_key() {
        let k1 = derive_key("op", &Ab { a: 1, b: "x" }).unwrap();
        let k2 = derive_key("op", &Ba { b: "x", a: 1 }).unwrap();
        assert_eq!(k1, k2);
    }

    #[test]
    fn test_hash_map_params_are_canonical() {
        let mut m1 = HashMap::new();
        let mut m2 = HashMap::new();
        for (k, v) in [("z", 1), ("a", 2), ("m", 3)] {
            m1.insert(k, v);
        }
        for (k, v) in [("m", 3), ("z", 1), ("a", 2)] {
            m2.insert(k, v);
        }
        assert_eq!(derive_key("op", &m1).unwrap(), derive_key("op", &m2).unwrap());
    }

    #[test]
    fn test_nested_objects_are_sorted() {
        let key = derive_key("op", &json!({"outer": {"z": 1, "a": [{"y": 2, "b": 3}]}})).unwrap();
        assert_eq!(key, r#"op:{"outer":{"a":[{"b":3,"y":2}],"z":1}}"#);
    }

    #[test]
    fn test_different_params_give_different_keys() {
        let k1 = derive_key("op", &json!({"user_id": "u1"})).unwrap();
        let k2 = derive_key("op", &json!({"user_id": "u2"})).unwrap();
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_non_string_map_keys_fail() {
        let mut m = HashMap::new();
        m.insert(vec![1u8], 1);
        assert!(derive_key("op", &m).is_err());
    }

    #[test]
    fn test_namespace_of() {
        assert_eq!(namespace_of("teamSpace.getMessages"), "teamSpace");
        assert_eq!(namespace_of("plain"), "plain");
    }
}
