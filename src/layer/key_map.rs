//! Map and helper traits used throughout the crate.
//!
//! Datasets, style descriptors and compositions are all keyed by name and must keep
//! the order they were declared in. This module provides the [`KeyMap`] alias
//! (currently backed by [`indexmap::IndexMap`]) and small helper traits used to keep
//! names consistent.

use indexmap::IndexMap;
use crate::engine::Engine;
use super::LayerWrapper;

/// Alias to reduce coupling with map implementation
pub type KeyMap<V> = IndexMap<String, V>;

/// Convenience trait to assure consistency between map key and name attribute of stored value.
pub trait Addable<V: Key> {
    /// Takes a value that provides a key and stores it under that key.
    fn add(&mut self, new_value: V);
}

impl<V: Key> Addable<V> for KeyMap<V> {
    fn add(&mut self, value: V) {
        self.insert(value.get_key(), value);
    }
}

/// Convenience trait to assure consistency between the key used for storage and the name of the layer.
pub trait Key {
    /// Returns a key under which the value should be stored in a key-value store.
    fn get_key(&self) -> String;
}

impl<E: Engine> Key for LayerWrapper<E> {
    fn get_key(&self) -> String {
        self.name().to_string()
    }
}
