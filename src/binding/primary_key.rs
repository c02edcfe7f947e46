//! Single-column primary key resolution

use super::constraints::ConstraintStore;
use super::error::{BindingError, BindingResult};
use super::key::{CodingTableKey, KeyRegistry};

/// Finds the one key whose column constraints include a primary key
pub struct PrimaryKeyResolver;

impl PrimaryKeyResolver {
    /// `Ok(None)` when no column is a primary key, `Ok(Some(key))` for exactly
    /// one, and `MultiplePrimaryKeys` otherwise. Composite keys belong in a
    /// table constraint.
    pub fn resolve<K: CodingTableKey>(
        registry: &KeyRegistry<K>,
        store: &ConstraintStore,
    ) -> BindingResult<Option<K>> {
        let candidates: Vec<K> = registry
            .keys()
            .iter()
            .copied()
            .filter(|key| {
                store
                    .column_constraints(key.raw_name())
                    .iter()
                    .any(|constraint| constraint.is_primary_key())
            })
            .collect();

        match candidates.as_slice() {
            [] => Ok(None),
            [key] => Ok(Some(*key)),
            _ => Err(BindingError::MultiplePrimaryKeys {
                record: registry.record_name(),
                keys: candidates.iter().map(|key| format!("{:?}", key)).collect(),
            }),
        }
    }
}
