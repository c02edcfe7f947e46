//! Per-key property handles

use std::collections::HashMap;

use super::error::BindingResult;
use super::key::{CodingTableKey, KeyRegistry, unbound_key};
use crate::statement::{IndexedColumn, Order, quote_identifier};

/// Column handle for one coding key.
///
/// Created once when a binding is sealed; callers only ever borrow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property<K: CodingTableKey> {
    key: K,
    name: &'static str,
    position: usize,
}

impl<K: CodingTableKey> Property<K> {
    pub fn key(&self) -> K {
        self.key
    }

    /// Column name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Column position in the table
    pub fn position(&self) -> usize {
        self.position
    }

    /// Column reference qualified by `table`, e.g. `messages.body`
    pub fn qualified(&self, table: &str) -> String {
        format!("{}.{}", quote_identifier(table), quote_identifier(self.name))
    }

    /// This column as an index or multi-column key member
    pub fn indexed(&self) -> IndexedColumn {
        IndexedColumn::new(self.name)
    }

    pub fn indexed_with(&self, order: Order) -> IndexedColumn {
        self.indexed().order(order)
    }
}

/// One property per key, looked up by key
#[derive(Debug, Clone)]
pub struct PropertyMap<K: CodingTableKey> {
    properties: Vec<Property<K>>,
    by_key: HashMap<K, usize>,
}

impl<K: CodingTableKey> PropertyMap<K> {
    pub fn build(registry: &KeyRegistry<K>) -> Self {
        let properties: Vec<_> = registry
            .keys()
            .iter()
            .enumerate()
            .map(|(position, key)| Property {
                key: *key,
                name: key.raw_name(),
                position,
            })
            .collect();
        let by_key = properties
            .iter()
            .map(|property| (property.key, property.position))
            .collect();

        Self { properties, by_key }
    }

    /// The property for `key`; `UnboundKey` if the key was not enumerated.
    pub fn property(&self, key: K) -> BindingResult<&Property<K>> {
        self.by_key
            .get(&key)
            .map(|index| &self.properties[*index])
            .ok_or_else(|| unbound_key(key))
    }

    /// All properties in column order
    pub fn all(&self) -> &[Property<K>] {
        &self.properties
    }
}
