//! Column definition assembly

use std::collections::HashMap;

use super::constraints::ConstraintStore;
use super::error::{BindingError, BindingResult};
use super::key::{CodingTableKey, KeyRegistry, record_name};
use crate::statement::{ColumnDef, ColumnType};

/// Builds column definitions from resolved types and stored constraints
pub struct ColumnDefBuilder;

impl ColumnDefBuilder {
    /// One definition per key, in key order. Constraints are appended in the
    /// order they were configured.
    pub fn build<K: CodingTableKey>(
        registry: &KeyRegistry<K>,
        column_types: &HashMap<&'static str, ColumnType>,
        store: &ConstraintStore,
    ) -> BindingResult<Vec<ColumnDef>> {
        registry
            .keys()
            .iter()
            .map(|key| Self::build_one(*key, column_types, store))
            .collect()
    }

    fn build_one<K: CodingTableKey>(
        key: K,
        column_types: &HashMap<&'static str, ColumnType>,
        store: &ConstraintStore,
    ) -> BindingResult<ColumnDef> {
        let raw_name = key.raw_name();
        // resolved types cover every registered key, see ColumnTypeResolver
        let column_type = column_types.get(raw_name).copied().ok_or_else(|| {
            BindingError::UndecidableType {
                record: record_name::<K>(),
                keys: vec![format!("{:?}", key)],
            }
        })?;

        let mut column_def = ColumnDef::new(raw_name, column_type);
        for constraint in store.column_constraints(raw_name) {
            column_def.add_constraint(constraint.clone());
        }
        Ok(column_def)
    }
}
