//! Typed document values and their Firestore wire encoding.
//!
//! Firestore wraps every value in a single-key object naming its type:
//!
//! ```text
//! {"stringValue": "Argan oil"}
//! {"integerValue": "3"}            // int64 travels as a string
//! {"doubleValue": 12.5}
//! {"timestampValue": "2026-10-19T09:30:00.000000Z"}
//! {"arrayValue": {"values": [ ... ]}}
//! {"mapValue": {"fields": { ... }}}
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value};

use crate::StoreError;

/// Named document fields.
pub type Fields = BTreeMap<String, FieldValue>;

/// A single document value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Timestamp(DateTime<Utc>),
    Array(Vec<FieldValue>),
    Map(Fields),
}

impl FieldValue {
    /// Convert plain JSON into a typed value.
    ///
    /// Numbers that fit an `i64` become integers, all others doubles.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => FieldValue::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => FieldValue::String(s.clone()),
            Value::Array(items) => FieldValue::Array(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => FieldValue::Map(fields_from_json(map)),
        }
    }

    /// Convert to plain JSON. Timestamps become RFC 3339 strings and
    /// non-finite doubles become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Boolean(b) => Value::Bool(*b),
            FieldValue::Integer(i) => Value::Number((*i).into()),
            FieldValue::Double(d) => Number::from_f64(*d).map(Value::Number).unwrap_or(Value::Null),
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::Timestamp(ts) => Value::String(format_timestamp(ts)),
            FieldValue::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            FieldValue::Map(fields) => fields_to_json(fields),
        }
    }

    /// Encode in the Firestore wire format.
    pub fn encode(&self) -> Value {
        let mut wrapper = Map::new();
        let (kind, inner) = match self {
            FieldValue::Null => ("nullValue", Value::Null),
            FieldValue::Boolean(b) => ("booleanValue", Value::Bool(*b)),
            FieldValue::Integer(i) => ("integerValue", Value::String(i.to_string())),
            FieldValue::Double(d) => ("doubleValue", encode_double(*d)),
            FieldValue::String(s) => ("stringValue", Value::String(s.clone())),
            FieldValue::Timestamp(ts) => ("timestampValue", Value::String(format_timestamp(ts))),
            FieldValue::Array(items) => {
                let mut array = Map::new();
                if !items.is_empty() {
                    array.insert(
                        "values".to_string(),
                        Value::Array(items.iter().map(Self::encode).collect()),
                    );
                }
                ("arrayValue", Value::Object(array))
            }
            FieldValue::Map(fields) => {
                let mut map = Map::new();
                map.insert("fields".to_string(), encode_fields(fields));
                ("mapValue", Value::Object(map))
            }
        };
        wrapper.insert(kind.to_string(), inner);
        Value::Object(wrapper)
    }

    /// Decode a value from the Firestore wire format.
    pub fn decode(value: &Value) -> Result<Self, StoreError> {
        let object = value
            .as_object()
            .ok_or_else(|| StoreError::Decode(format!("expected typed value object, got {value}")))?;
        let (kind, inner) = object
            .iter()
            .next()
            .ok_or_else(|| StoreError::Decode("empty typed value".to_string()))?;

        match kind.as_str() {
            "nullValue" => Ok(FieldValue::Null),
            "booleanValue" => inner
                .as_bool()
                .map(FieldValue::Boolean)
                .ok_or_else(|| mismatch(kind, inner)),
            "integerValue" => match inner {
                Value::String(s) => s
                    .parse::<i64>()
                    .map(FieldValue::Integer)
                    .map_err(|_| mismatch(kind, inner)),
                Value::Number(n) => n.as_i64().map(FieldValue::Integer).ok_or_else(|| mismatch(kind, inner)),
                _ => Err(mismatch(kind, inner)),
            },
            "doubleValue" => match inner {
                Value::Number(n) => n.as_f64().map(FieldValue::Double).ok_or_else(|| mismatch(kind, inner)),
                Value::String(s) => match s.as_str() {
                    "NaN" => Ok(FieldValue::Double(f64::NAN)),
                    "Infinity" => Ok(FieldValue::Double(f64::INFINITY)),
                    "-Infinity" => Ok(FieldValue::Double(f64::NEG_INFINITY)),
                    _ => Err(mismatch(kind, inner)),
                },
                _ => Err(mismatch(kind, inner)),
            },
            "stringValue" | "referenceValue" | "bytesValue" => inner
                .as_str()
                .map(|s| FieldValue::String(s.to_string()))
                .ok_or_else(|| mismatch(kind, inner)),
            "timestampValue" => {
                let raw = inner.as_str().ok_or_else(|| mismatch(kind, inner))?;
                DateTime::parse_from_rfc3339(raw)
                    .map(|ts| FieldValue::Timestamp(ts.with_timezone(&Utc)))
                    .map_err(|e| StoreError::Decode(format!("timestampValue {raw}: {e}")))
            }
            "arrayValue" => {
                let values: &[Value] = match inner.get("values") {
                    Some(Value::Array(values)) => values.as_slice(),
                    Some(_) => return Err(mismatch(kind, inner)),
                    None => &[],
                };
                values
                    .iter()
                    .map(Self::decode)
                    .collect::<Result<Vec<_>, _>>()
                    .map(FieldValue::Array)
            }
            "mapValue" => match inner.get("fields") {
                Some(Value::Object(fields)) => decode_fields(fields).map(FieldValue::Map),
                Some(_) => Err(mismatch(kind, inner)),
                None => Ok(FieldValue::Map(Fields::new())),
            },
            "geoPointValue" => {
                let mut point = Fields::new();
                for axis in ["latitude", "longitude"] {
                    let coordinate = inner.get(axis).and_then(Value::as_f64).unwrap_or(0.0);
                    point.insert(axis.to_string(), FieldValue::Double(coordinate));
                }
                Ok(FieldValue::Map(point))
            }
            other => Err(StoreError::Decode(format!("unsupported value type {other}"))),
        }
    }

    /// Borrow the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<f64> for FieldValue {
    fn from(d: f64) -> Self {
        FieldValue::Double(d)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(ts: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(ts)
    }
}

/// Convert a JSON object into typed fields.
pub fn fields_from_json(map: &Map<String, Value>) -> Fields {
    map.iter()
        .map(|(k, v)| (k.clone(), FieldValue::from_json(v)))
        .collect()
}

/// Convert typed fields into a plain JSON object.
pub fn fields_to_json(fields: &Fields) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect(),
    )
}

/// Encode fields as a Firestore `fields` object.
pub fn encode_fields(fields: &Fields) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(k, v)| (k.clone(), v.encode()))
            .collect(),
    )
}

/// Decode a Firestore `fields` object.
pub fn decode_fields(map: &Map<String, Value>) -> Result<Fields, StoreError> {
    map.iter()
        .map(|(k, v)| {
            FieldValue::decode(v)
                .map(|decoded| (k.clone(), decoded))
                .map_err(|e| StoreError::Decode(format!("field {k}: {e}")))
        })
        .collect()
}

fn encode_double(d: f64) -> Value {
    match Number::from_f64(d) {
        Some(n) => Value::Number(n),
        None if d.is_nan() => Value::String("NaN".to_string()),
        None if d > 0.0 => Value::String("Infinity".to_string()),
        None => Value::String("-Infinity".to_string()),
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn mismatch(kind: &str, inner: &Value) -> StoreError {
    StoreError::Decode(format!("{kind} has unexpected payload {inner}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_decode_product_fields() {
        let raw = json!({
            "name": {"stringValue": "زيت الأركان"},
            "price": {"integerValue": "120"},
            "image": {"stringValue": "https://cdn.example/argan.jpg"}
        });
        let fields = decode_fields(raw.as_object().unwrap()).unwrap();

        assert_eq!(fields["name"].as_str(), Some("زيت الأركان"));
        assert_eq!(fields["price"], FieldValue::Integer(120));
        assert_eq!(
            fields_to_json(&fields),
            json!({
                "name": "زيت الأركان",
                "price": 120,
                "image": "https://cdn.example/argan.jpg"
            })
        );
    }

    #[test]
    fn test_decode_double_and_numeric_integer() {
        assert_eq!(
            FieldValue::decode(&json!({"doubleValue": 12.5})).unwrap(),
            FieldValue::Double(12.5)
        );
        assert_eq!(
            FieldValue::decode(&json!({"integerValue": 7})).unwrap(),
            FieldValue::Integer(7)
        );
    }

    #[test]
    fn test_decode_nested_array_of_maps() {
        let raw = json!({"arrayValue": {"values": [
            {"mapValue": {"fields": {"id": {"stringValue": "p1"}, "quantity": {"integerValue": "2"}}}}
        ]}});
        let decoded = FieldValue::decode(&raw).unwrap();
        assert_eq!(decoded.to_json(), json!([{"id": "p1", "quantity": 2}]));
    }

    #[test]
    fn test_decode_empty_containers() {
        assert_eq!(
            FieldValue::decode(&json!({"arrayValue": {}})).unwrap(),
            FieldValue::Array(Vec::new())
        );
        assert_eq!(
            FieldValue::decode(&json!({"mapValue": {}})).unwrap(),
            FieldValue::Map(Fields::new())
        );
    }

    #[test]
    fn test_decode_rejects_bad_payloads() {
        assert!(FieldValue::decode(&json!({"integerValue": "twelve"})).is_err());
        assert!(FieldValue::decode(&json!({"timestampValue": "yesterday"})).is_err());
        assert!(FieldValue::decode(&json!({"mysteryValue": 1})).is_err());
        assert!(FieldValue::decode(&json!("bare string")).is_err());
        assert!(FieldValue::decode(&json!({})).is_err());
    }

    #[test]
    fn test_encode_wire_shapes() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();

        assert_eq!(FieldValue::Integer(40).encode(), json!({"integerValue": "40"}));
        assert_eq!(FieldValue::Double(12.5).encode(), json!({"doubleValue": 12.5}));
        assert_eq!(FieldValue::Null.encode(), json!({"nullValue": null}));
        assert_eq!(
            FieldValue::Timestamp(ts).encode(),
            json!({"timestampValue": "2026-10-19T09:30:00.000000Z"})
        );
        assert_eq!(FieldValue::Array(Vec::new()).encode(), json!({"arrayValue": {}}));
    }

    #[test]
    fn test_encode_map_fields() {
        let mut fields = Fields::new();
        fields.insert("customer_name".into(), "Amina".into());
        fields.insert("total".into(), FieldValue::Integer(40));

        assert_eq!(
            encode_fields(&fields),
            json!({
                "customer_name": {"stringValue": "Amina"},
                "total": {"integerValue": "40"}
            })
        );
    }

    #[test]
    fn test_timestamp_survives_decode_after_encode() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let decoded = FieldValue::decode(&FieldValue::Timestamp(ts).encode()).unwrap();
        assert_eq!(decoded, FieldValue::Timestamp(ts));
    }

    #[test]
    fn test_from_json_number_kinds() {
        assert_eq!(FieldValue::from_json(&json!(20)), FieldValue::Integer(20));
        assert_eq!(FieldValue::from_json(&json!(9.99)), FieldValue::Double(9.99));
        assert_eq!(FieldValue::Double(f64::NAN).to_json(), Value::Null);
    }
}
