//! Lenient access to request parameters.
//!
//! Requests arrive as arbitrary JSON objects written by browsers, scripts
//! and older clients. Out-of-range or malformed inputs are not errors:
//! each accessor here coerces what it can and returns `None` for the
//! rest, leaving the caller to apply its default.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The fields of a request body, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    /// Creates an empty parameter bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds parameters from any JSON value. Non-objects yield an
    /// empty bag.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Sets a field, returning `self` for chaining.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Returns the raw value of a field. `null` counts as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Returns a string field as-is. Non-string values are `None`.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Returns a field coerced to a string. Numbers and booleans are
    /// rendered the way they appear in JSON.
    pub fn string(&self, key: &str) -> Option<String> {
        self.get(key).map(value_to_string)
    }

    /// Returns a numeric field floored to an integer.
    ///
    /// Accepts JSON numbers and numeric strings (`"12"`, `" 7.9 "`).
    /// Anything else, including NaN-like strings, is `None`.
    pub fn int(&self, key: &str) -> Option<i64> {
        let raw = match self.get(key)? {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        if !raw.is_finite() {
            return None;
        }
        // `as` saturates at the i64 bounds.
        Some(raw.floor() as i64)
    }

    /// Returns a field that must be an exact non-negative integer, such
    /// as a list index. Fractions and negatives are `None`.
    pub fn index(&self, key: &str) -> Option<usize> {
        let raw = match self.get(key)? {
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    return usize::try_from(u).ok();
                }
                n.as_f64()?
            }
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        if raw.is_finite() && raw >= 0.0 && raw.fract() == 0.0 && raw <= usize::MAX as f64 {
            Some(raw as usize)
        } else {
            None
        }
    }

    /// Returns an array field with every entry coerced to a string.
    /// A missing or non-array field is `None`.
    pub fn strings(&self, key: &str) -> Option<Vec<String>> {
        match self.get(key)? {
            Value::Array(items) => Some(items.iter().map(value_to_string).collect()),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn params(value: Value) -> Params {
        Params::from_value(value)
    }

    #[test]
    fn test_from_value_non_object_is_empty() {
        assert_eq!(params(json!([1, 2])), Params::new());
        assert_eq!(params(json!("room")), Params::new());
    }

    #[test]
    fn test_int_floors_numbers_and_numeric_strings() {
        let p = params(json!({ "a": 7.9, "b": "12", "c": " -3.5 ", "d": 4 }));
        assert_eq!(p.int("a"), Some(7));
        assert_eq!(p.int("b"), Some(12));
        assert_eq!(p.int("c"), Some(-4));
        assert_eq!(p.int("d"), Some(4));
    }

    #[test]
    fn test_int_rejects_non_numeric() {
        let p = params(json!({ "a": "abc", "b": true, "c": null, "d": [1] }));
        assert_eq!(p.int("a"), None);
        assert_eq!(p.int("b"), None);
        assert_eq!(p.int("c"), None);
        assert_eq!(p.int("d"), None);
        assert_eq!(p.int("missing"), None);
    }

    #[test]
    fn test_index_accepts_only_exact_non_negative_integers() {
        let p = params(json!({ "a": 2, "b": "1", "c": 1.5, "d": -1, "e": 3.0 }));
        assert_eq!(p.index("a"), Some(2));
        assert_eq!(p.index("b"), Some(1));
        assert_eq!(p.index("c"), None);
        assert_eq!(p.index("d"), None);
        assert_eq!(p.index("e"), Some(3));
    }

    #[test]
    fn test_strings_coerces_entries() {
        let p = params(json!({ "names": ["Alice", 2, true, null, 1.5] }));
        assert_eq!(
            p.strings("names"),
            Some(vec![
                "Alice".to_string(),
                "2".to_string(),
                "true".to_string(),
                String::new(),
                "1.5".to_string(),
            ])
        );
    }

    #[test]
    fn test_strings_non_array_is_none() {
        let p = params(json!({ "names": "Alice" }));
        assert_eq!(p.strings("names"), None);
    }

    #[test]
    fn test_str_only_matches_strings() {
        let p = params(json!({ "shape": "circle", "n": 3 }));
        assert_eq!(p.str("shape"), Some("circle"));
        assert_eq!(p.str("n"), None);
        assert_eq!(p.string("n"), Some("3".to_string()));
    }

    #[test]
    fn test_with_builds_params() {
        let p = Params::new().with("n", 5).with("shape", "diamond");
        assert_eq!(p.int("n"), Some(5));
        assert_eq!(p.str("shape"), Some("diamond"));
    }
}
