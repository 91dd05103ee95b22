//! Dynamically typed record values.
//!
//! Datasets are handed over as plain records whose shape is only known once a
//! field mapping is applied. [`Value`] models everything such a record can hold,
//! the same way a JSON document does.

use super::KeyMap;

/// Wrapper used to implement the dynamic type system of dataset records.
#[derive(Debug, PartialEq, Clone, Default)]
pub enum Value {
    /// Absent or explicitly empty value.
    #[default]
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Any number. Integers are widened to `f64`.
    Number(f64),
    /// UTF-8 text.
    Text(String),
    /// Ordered sequence of values, e.g. a coordinate pair or a ring.
    List(Vec<Value>),
    /// Nested record.
    Map(KeyMap<Value>),
}

impl Value {
    /// Returns the number, if this is a [`Value::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            Value::Number(x) => Some(x),
            _ => None,
        }
    }

    /// Returns the text, if this is a [`Value::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match *self {
            Value::Text(ref s) => Some(s),
            _ => None,
        }
    }

    /// Returns the flag, if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the items, if this is a [`Value::List`].
    pub fn as_list(&self) -> Option<&[Value]> {
        match *self {
            Value::List(ref items) => Some(items),
            _ => None,
        }
    }

    /// Returns the nested record, if this is a [`Value::Map`].
    pub fn as_map(&self) -> Option<&KeyMap<Value>> {
        match *self {
            Value::Map(ref m) => Some(m),
            _ => None,
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match *self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Number(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Number(f64::from(x))
    }
}

impl From<i32> for Value {
    fn from(x: i32) -> Self {
        Value::Number(f64::from(x))
    }
}

impl From<u32> for Value {
    fn from(x: u32) -> Self {
        Value::Number(f64::from(x))
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Number(x as f64)
    }
}

impl From<usize> for Value {
    fn from(x: usize) -> Self {
        Value::Number(x as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<[f64; 2]> for Value {
    fn from(pair: [f64; 2]) -> Self {
        Value::List(vec![Value::Number(pair[0]), Value::Number(pair[1])])
    }
}

impl From<(f64, f64)> for Value {
    fn from((a, b): (f64, f64)) -> Self {
        Value::List(vec![Value::Number(a), Value::Number(b)])
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl From<KeyMap<Value>> for Value {
    fn from(m: KeyMap<Value>) -> Self {
        Value::Map(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_variant() {
        assert_eq!(Value::from(2.5).as_number(), Some(2.5));
        assert_eq!(Value::from("a").as_text(), Some("a"));
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from("a").as_number(), None);
        assert!(Value::Null.is_null());
        assert!(Value::from(1).as_list().is_none());
    }

    #[test]
    fn nested_lists_convert() {
        let ring = vec![[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
        let v = Value::from(ring);
        let items = v.as_list().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1], Value::List(vec![Value::Number(0.0), Value::Number(1.0)]));
    }

    #[test]
    fn none_becomes_null() {
        let v: Value = Option::<f64>::None.into();
        assert_eq!(v, Value::Null);
        assert_eq!(v.type_name(), "null");
    }
}
