use std::fmt;

use serde::de::{ self, MapAccess, SeqAccess, Visitor };
use serde::ser::{ SerializeMap, SerializeSeq };
use serde::{ Deserialize, Deserializer, Serialize, Serializer };

use crate::errors::LayerResult;
use crate::layer::{ Dataset, KeyMap, Value };

// ============================================================================
// Serialization
// ============================================================================

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match *self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(b),
            Value::Number(x) => serializer.serialize_f64(x),
            Value::Text(ref s) => serializer.serialize_str(s),
            Value::List(ref items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(ref m) => {
                let mut map = serializer.serialize_map(Some(m.len()))?;
                for (k, v) in m {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

// ============================================================================
// Deserialization
// ============================================================================

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a record value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, x: i64) -> Result<Value, E> {
        Ok(Value::Number(x as f64))
    }

    fn visit_u64<E: de::Error>(self, x: u64) -> Result<Value, E> {
        Ok(Value::Number(x as f64))
    }

    fn visit_f64<E: de::Error>(self, x: f64) -> Result<Value, E> {
        Ok(Value::Number(x))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
        Ok(Value::Text(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
        Ok(Value::Text(s))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut m = KeyMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((k, v)) = access.next_entry::<String, Value>()? {
            m.insert(k, v);
        }
        Ok(Value::Map(m))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Converts serializable items into a [`Dataset`].
///
/// Every item must serialize to a map, e.g. a struct with named fields.
///
/// ```rust
/// #[derive(serde::Serialize)]
/// struct City { name: &'static str, coordinates: [f64; 2] }
///
/// let ds = geolayers::to_dataset_serde(&[City { name: "Chongqing", coordinates: [106.55, 29.56] }]).unwrap();
/// assert_eq!(ds[0].len(), 2);
/// ```
pub fn to_dataset_serde<T: Serialize>(items: &[T]) -> LayerResult<Dataset> {
    let json = serde_json::to_value(items)?;
    Ok(serde_json::from_value(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::RecordAccess;

    #[test]
    fn value_json_round_trip_keeps_order() {
        let text = r#"{"name":"a","coordinates":[1.5,2.0],"tags":null,"on":true,"meta":{"z":1.0}}"#;
        let v: Value = serde_json::from_str(text).unwrap();
        let m = v.as_map().unwrap();
        let keys: Vec<_> = m.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "coordinates", "tags", "on", "meta"]);
        assert!(m.get_value("tags").unwrap().is_null());
        assert_eq!(serde_json::to_string(&v).unwrap(), text);
    }

    #[test]
    fn integers_widen_to_numbers() {
        let v: Value = serde_json::from_str("[1, -2, 3.5]").unwrap();
        assert_eq!(v, Value::from(vec![1.0, -2.0, 3.5]));
    }

    #[test]
    fn serde_dataset_rejects_scalars() {
        assert!(to_dataset_serde(&[1, 2]).is_err());
    }
}
