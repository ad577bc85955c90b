//! # Canonical Serialization
//!
//! Defines [`CanonicalBytes`], the sole construction path for bytes used as
//! Verifiable Credential proof input across the workspace.
//!
//! ## Security Invariant
//!
//! The inner `Vec<u8>` is private. The only way to construct `CanonicalBytes`
//! is through [`CanonicalBytes::new()`] / [`CanonicalBytes::from_value()`],
//! which apply the coercion pipeline before serialization. Signature
//! verification APIs in `prov-crypto` accept `&CanonicalBytes`, so a
//! non-canonical proof input cannot be produced by accident.
//!
//! ## Coercion Rules
//!
//! 1. Reject floats — numeric fields must be strings or integers.
//! 2. Normalize RFC 3339 datetimes to UTC with `Z` suffix, truncated to
//!    seconds.
//! 3. Sort object keys lexicographically.
//! 4. Use compact separators (no whitespace).

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by canonicalization with the coercion rules
/// above.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        Self::from_value(value)
    }

    /// Construct canonical bytes from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, CanonicalizationError> {
        let coerced = coerce_json_value(value)?;
        Ok(Self(serde_json::to_vec(&coerced)?))
    }

    /// Access the canonical bytes for signature computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume and return the inner byte vector.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively coerce JSON values according to the canonicalization rules.
fn coerce_json_value(value: Value) -> Result<Value, CanonicalizationError> {
    match value {
        Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                if n.is_f64() && !n.is_i64() && !n.is_u64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(Value::Number(n))
        }
        Value::Object(map) => {
            // serde_json::Map is BTreeMap-backed, so rebuilding the map
            // yields lexicographically sorted keys on serialization.
            let mut coerced = serde_json::Map::new();
            for (k, v) in map {
                coerced.insert(k, coerce_json_value(v)?);
            }
            Ok(Value::Object(coerced))
        }
        Value::Array(arr) => {
            let coerced: Result<Vec<_>, _> = arr.into_iter().map(coerce_json_value).collect();
            Ok(Value::Array(coerced?))
        }
        Value::String(s) => {
            // Datetime normalization: RFC 3339 strings become UTC ISO8601
            // with Z suffix, truncated to seconds.
            if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&s) {
                let utc = dt.with_timezone(&chrono::Utc);
                Ok(Value::String(utc.format("%Y-%m-%dT%H:%M:%SZ").to_string()))
            } else {
                Ok(Value::String(s))
            }
        }
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_bytes_compact_output() {
        let cb = CanonicalBytes::new(&json!({"b": 2, "a": 1})).unwrap();
        assert_eq!(cb.as_bytes(), br#"{"a":1,"b":2}"#);
    }

    #[test]
    fn canonical_bytes_deterministic() {
        let v = json!({"z": [1, 2], "a": {"k": "v"}});
        let c1 = CanonicalBytes::new(&v).unwrap();
        let c2 = CanonicalBytes::new(&v).unwrap();
        assert_eq!(c1, c2);
    }

    #[test]
    fn floats_are_rejected() {
        let result = CanonicalBytes::new(&json!({"amount": 1.5}));
        assert!(matches!(
            result,
            Err(CanonicalizationError::FloatRejected(_))
        ));
    }

    #[test]
    fn integers_pass_through() {
        let cb = CanonicalBytes::new(&json!({"n": 42})).unwrap();
        assert_eq!(cb.as_bytes(), br#"{"n":42}"#);
    }

    #[test]
    fn datetime_normalized_to_utc_seconds() {
        let cb = CanonicalBytes::new(&json!({"at": "2026-01-15T14:30:00.123+02:00"})).unwrap();
        assert_eq!(cb.as_bytes(), br#"{"at":"2026-01-15T12:30:00Z"}"#);
    }

    #[test]
    fn non_datetime_strings_untouched() {
        let cb = CanonicalBytes::new(&json!({"s": "not a date"})).unwrap();
        assert_eq!(cb.as_bytes(), br#"{"s":"not a date"}"#);
    }

    #[test]
    fn nested_float_rejected() {
        let result = CanonicalBytes::new(&json!({"outer": {"inner": [1, 2.5]}}));
        assert!(result.is_err());
    }

    #[test]
    fn into_bytes_matches_as_bytes() {
        let cb = CanonicalBytes::new(&json!({"x": true})).unwrap();
        let expected = cb.as_bytes().to_vec();
        assert_eq!(cb.into_bytes(), expected);
    }
}
