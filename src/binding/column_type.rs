//! Column type resolution

use std::collections::HashMap;

use super::error::{BindingError, BindingResult};
use super::key::{CodingTableKey, KeyRegistry};
use crate::statement::ColumnType;

/// Storage type oracle implemented by record types.
///
/// Maps each persisted field's raw name to its storage type. It describes the
/// record type as a whole, so it is consulted once per binding, before any column
/// definition is built.
pub trait ColumnTypeOracle {
    fn column_types() -> HashMap<String, ColumnType>;
}

/// Resolves every key of a registry to a storage type
pub struct ColumnTypeResolver;

impl ColumnTypeResolver {
    /// Consult `K::Root`'s oracle and type every key in `registry`.
    ///
    /// Raw names must match the oracle's names exactly (case-sensitive). Every
    /// key the oracle leaves out is reported in one `UndecidableType` error.
    pub fn resolve<K: CodingTableKey>(
        registry: &KeyRegistry<K>,
    ) -> BindingResult<HashMap<&'static str, ColumnType>> {
        let decoded = <K::Root as ColumnTypeOracle>::column_types();

        let mut types = HashMap::with_capacity(registry.len());
        let mut undecidable = Vec::new();
        for key in registry.keys() {
            match decoded.get(key.raw_name()) {
                Some(column_type) => {
                    types.insert(key.raw_name(), *column_type);
                }
                None => undecidable.push(format!("{:?}", key)),
            }
        }

        if !undecidable.is_empty() {
            return Err(BindingError::UndecidableType {
                record: registry.record_name(),
                keys: undecidable,
            });
        }
        Ok(types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample;

    impl ColumnTypeOracle for Sample {
        fn column_types() -> HashMap<String, ColumnType> {
            HashMap::from([
                ("id".to_string(), ColumnType::Integer),
                // oracle names are matched case-sensitively
                ("Title".to_string(), ColumnType::Text),
            ])
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum SampleKey {
        Id,
        Title,
        Body,
    }

    impl CodingTableKey for SampleKey {
        type Root = Sample;

        fn all_keys() -> &'static [Self] {
            &[SampleKey::Id, SampleKey::Title, SampleKey::Body]
        }

        fn raw_name(&self) -> &'static str {
            match self {
                SampleKey::Id => "id",
                SampleKey::Title => "title",
                SampleKey::Body => "body",
            }
        }
    }

    #[test]
    fn test_missing_types_are_all_reported() {
        let registry = KeyRegistry::<SampleKey>::new().unwrap();
        let err = ColumnTypeResolver::resolve(&registry).unwrap_err();

        match err {
            BindingError::UndecidableType { keys, .. } => {
                assert_eq!(keys, vec!["Title".to_string(), "Body".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
