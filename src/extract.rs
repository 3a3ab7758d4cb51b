//! Conversion of loosely typed JSON fields into display strings.

use serde_json::{Map, Value};

/// Placeholder shown for fields the service did not provide.
pub const MISSING: &str = "N/A";

/// Returns the value stored under `key` as a display string.
///
/// Strings are returned verbatim (an empty string stays empty), numbers are
/// rendered in fixed-point notation with six decimals and booleans become
/// `"1"` or `"0"`. Missing keys, `null` and nested arrays or objects all
/// yield [`MISSING`].
#[must_use]
pub fn extract(document: &Map<String, Value>, key: &str) -> String {
  match document.get(key) {
    Some(Value::String(s)) => s.clone(),
    Some(Value::Number(n)) => n
      .as_f64()
      .map_or_else(|| MISSING.to_string(), |v| format!("{v:.6}")),
    Some(Value::Bool(b)) => String::from(if *b { "1" } else { "0" }),
    Some(Value::Null | Value::Array(_) | Value::Object(_)) | None => {
      MISSING.to_string()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn doc(value: &Value) -> Map<String, Value> {
    value.as_object().cloned().expect("test document is an object")
  }

  #[test]
  fn test_string_is_returned_verbatim() {
    let d = doc(&json!({ "ip": "8.8.8.8", "city_name": "Mountain View" }));
    assert_eq!(extract(&d, "ip"), "8.8.8.8");
    assert_eq!(extract(&d, "city_name"), "Mountain View");
  }

  #[test]
  fn test_empty_string_is_not_missing() {
    let d = doc(&json!({ "empty_string": "" }));
    assert_eq!(extract(&d, "empty_string"), "");
  }

  #[test]
  fn test_missing_and_null_are_na() {
    let d = doc(&json!({ "missing_key": null }));
    assert_eq!(extract(&d, "country"), MISSING);
    assert_eq!(extract(&d, "missing_key"), MISSING);
  }

  #[test]
  fn test_numbers_use_six_decimals() {
    let d = doc(&json!({
      "latitude": 37.76,
      "longitude": -122.4,
      "is_proxy": 1,
      "tiny": 0.000_000_1,
      "big": 1.0e21
    }));
    assert_eq!(extract(&d, "latitude"), "37.760000");
    assert_eq!(extract(&d, "longitude"), "-122.400000");
    assert_eq!(extract(&d, "is_proxy"), "1.000000");
    assert_eq!(extract(&d, "tiny"), "0.000000");
    assert_eq!(extract(&d, "big"), "1000000000000000000000.000000");
  }

  #[test]
  fn test_numbers_round_the_seventh_decimal() {
    let d = doc(&json!({
      "up": 12.345_678_9,
      "down": 12.345_678_4,
      "carry": 37.769_999_9,
      "negative": -122.084_056_7,
      "small": 0.000_000_9
    }));
    assert_eq!(extract(&d, "up"), "12.345679");
    assert_eq!(extract(&d, "down"), "12.345678");
    assert_eq!(extract(&d, "carry"), "37.770000");
    assert_eq!(extract(&d, "negative"), "-122.084057");
    assert_eq!(extract(&d, "small"), "0.000001");
  }

  #[test]
  fn test_booleans_map_to_digits() {
    let d = doc(&json!({ "yes": true, "no": false }));
    assert_eq!(extract(&d, "yes"), "1");
    assert_eq!(extract(&d, "no"), "0");
  }

  #[test]
  fn test_nested_values_are_na() {
    let d = doc(&json!({ "list": [1, 2], "obj": { "a": 1 } }));
    assert_eq!(extract(&d, "list"), MISSING);
    assert_eq!(extract(&d, "obj"), MISSING);
  }
}
