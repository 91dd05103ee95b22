//! Default record representation and access traits.
//!
//! [`DefaultRecord`] is the ready-to-use dataset record provided by this crate.
//! It is a map from field name to [`Value`], preserving insertion order.

use super::KeyMap;
use super::Value;

/// Ready to use data-structure for dataset records.
///
/// Datasets are supplied from outside and carry no schema: which field holds the
/// geometry is only declared later by a [`FieldMapping`](super::FieldMapping).
/// To keep that flexibility this alias to an ordered map is provided.
pub type DefaultRecord = KeyMap<Value>;

/// An ordered sequence of records, as bound to a layer by `load_data`.
pub type Dataset = Vec<DefaultRecord>;

/// Provides typed getters over a record.
///
/// Only [`RecordAccess::get_value`] must be implemented, the typed getters
/// return `None` both for missing fields and for fields of another type.
pub trait RecordAccess {
    /// Returns the raw value stored under `key`.
    fn get_value(&self, key: &str) -> Option<&Value>;

    /// Returns the field as a number.
    fn get_number(&self, key: &str) -> Option<f64> {
        self.get_value(key)?.as_number()
    }

    /// Returns the field as text.
    fn get_text(&self, key: &str) -> Option<&str> {
        self.get_value(key)?.as_text()
    }

    /// Returns the field as a flag.
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get_value(key)?.as_bool()
    }

    /// Returns the field as a list.
    fn get_list(&self, key: &str) -> Option<&[Value]> {
        self.get_value(key)?.as_list()
    }
}

impl RecordAccess for DefaultRecord {
    fn get_value(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

/// Converts a value into a dataset record.
///
/// Usually derived with `#[derive(Record)]`.
pub trait IntoRecord {
    /// Consumes `self` and returns the record representation.
    fn into_record(self) -> DefaultRecord;
}

impl IntoRecord for DefaultRecord {
    fn into_record(self) -> DefaultRecord {
        self
    }
}

/// Describes the fields a record type produces.
pub trait RecordSchema {
    /// Returns the field names in declaration order.
    fn field_names() -> Vec<&'static str>;
}

/// Collects typed items into a [`Dataset`].
pub fn to_dataset<I, T>(items: I) -> Dataset
where
    I: IntoIterator<Item = T>,
    T: IntoRecord,
{
    items.into_iter().map(IntoRecord::into_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city() -> DefaultRecord {
        let mut r = DefaultRecord::new();
        r.insert("name".to_string(), Value::from("Hangzhou"));
        r.insert("coordinates".to_string(), Value::from([120.15, 30.28]));
        r.insert("capital".to_string(), Value::from(false));
        r
    }

    #[test]
    fn typed_getters() {
        let r = city();
        assert_eq!(r.get_text("name"), Some("Hangzhou"));
        assert_eq!(r.get_list("coordinates").map(|l| l.len()), Some(2));
        assert_eq!(r.get_bool("capital"), Some(false));
        assert_eq!(r.get_number("name"), None);
        assert_eq!(r.get_number("missing"), None);
    }

    #[test]
    fn to_dataset_keeps_order() {
        let mut other = city();
        other.insert("name".to_string(), Value::from("Tianjin"));
        let ds = to_dataset(vec![city(), other]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds[1].get_text("name"), Some("Tianjin"));
        let keys: Vec<_> = ds[0].keys().cloned().collect();
        assert_eq!(keys, vec!["name", "coordinates", "capital"]);
    }
}
