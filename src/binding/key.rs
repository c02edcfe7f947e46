//! Coding keys and their registry.
//!
//! A record type opts into table binding by declaring a key type: usually a
//! field-less enum with one variant per persisted field. The key type lists its
//! variants in column order through [`CodingTableKey::all_keys`], so enumeration
//! is an ordinary static slice rather than runtime inspection.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use super::column_type::ColumnTypeOracle;
use super::error::{BindingError, BindingResult};

/// Key identifying one persisted field of a record type.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use table_binding_sdk::binding::{CodingTableKey, ColumnTypeOracle};
/// use table_binding_sdk::statement::{ColumnCodable, ColumnType};
///
/// struct Note {
///     id: i64,
///     text: String,
/// }
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum NoteKey {
///     Id,
///     Text,
/// }
///
/// impl CodingTableKey for NoteKey {
///     type Root = Note;
///
///     fn all_keys() -> &'static [Self] {
///         &[NoteKey::Id, NoteKey::Text]
///     }
///
///     fn raw_name(&self) -> &'static str {
///         match self {
///             NoteKey::Id => "id",
///             NoteKey::Text => "text",
///         }
///     }
/// }
///
/// impl ColumnTypeOracle for Note {
///     fn column_types() -> HashMap<String, ColumnType> {
///         HashMap::from([
///             ("id".to_string(), i64::COLUMN_TYPE),
///             ("text".to_string(), String::COLUMN_TYPE),
///         ])
///     }
/// }
/// ```
pub trait CodingTableKey: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Record type owning the keys
    type Root: ColumnTypeOracle;

    /// Every key of the record type, in column order.
    fn all_keys() -> &'static [Self];

    /// Column name the key is stored under
    fn raw_name(&self) -> &'static str;
}

/// Name of the record type owning `K`, for diagnostics.
pub fn record_name<K: CodingTableKey>() -> &'static str {
    std::any::type_name::<K::Root>()
}

/// Ordered, validated set of keys for one record type
#[derive(Debug, Clone)]
pub struct KeyRegistry<K: CodingTableKey> {
    keys: Vec<K>,
    positions: HashMap<K, usize>,
}

impl<K: CodingTableKey> KeyRegistry<K> {
    /// Enumerate `K`'s keys.
    ///
    /// Fails when the enumeration is empty, lists a key twice, or gives two
    /// keys the same raw name.
    pub fn new() -> BindingResult<Self> {
        let record = record_name::<K>();
        let declared = K::all_keys();
        if declared.is_empty() {
            return Err(BindingError::NoKeys { record });
        }

        let mut keys = Vec::with_capacity(declared.len());
        let mut positions = HashMap::with_capacity(declared.len());
        let mut raw_names = HashSet::with_capacity(declared.len());
        for (position, key) in declared.iter().copied().enumerate() {
            if positions.insert(key, position).is_some() {
                return Err(BindingError::DuplicateKey {
                    record,
                    key: format!("{:?}", key),
                });
            }
            if !raw_names.insert(key.raw_name()) {
                return Err(BindingError::DuplicateRawName {
                    record,
                    name: key.raw_name().to_string(),
                });
            }
            keys.push(key);
        }

        Ok(Self { keys, positions })
    }

    /// Keys in column order
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Never true for a registry returned by [`KeyRegistry::new`].
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Column position of `key`, if it belongs to this registry
    pub fn position(&self, key: K) -> Option<usize> {
        self.positions.get(&key).copied()
    }

    pub fn contains(&self, key: K) -> bool {
        self.positions.contains_key(&key)
    }

    /// Look up a key by its raw column name (case-sensitive)
    pub fn key_named(&self, raw_name: &str) -> Option<K> {
        self.keys.iter().copied().find(|key| key.raw_name() == raw_name)
    }

    pub fn record_name(&self) -> &'static str {
        record_name::<K>()
    }
}

pub(crate) fn unbound_key<K: CodingTableKey>(key: K) -> BindingError {
    BindingError::UnboundKey {
        record: record_name::<K>(),
        key: format!("{:?}", key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::ColumnType;

    struct Empty;

    impl ColumnTypeOracle for Empty {
        fn column_types() -> HashMap<String, ColumnType> {
            HashMap::new()
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum EmptyKey {}

    impl CodingTableKey for EmptyKey {
        type Root = Empty;

        fn all_keys() -> &'static [Self] {
            &[]
        }

        fn raw_name(&self) -> &'static str {
            match *self {}
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum ClashKey {
        First,
        Second,
    }

    impl CodingTableKey for ClashKey {
        type Root = Empty;

        fn all_keys() -> &'static [Self] {
            &[ClashKey::First, ClashKey::Second]
        }

        fn raw_name(&self) -> &'static str {
            "same"
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum RepeatKey {
        Only,
    }

    impl CodingTableKey for RepeatKey {
        type Root = Empty;

        fn all_keys() -> &'static [Self] {
            &[RepeatKey::Only, RepeatKey::Only]
        }

        fn raw_name(&self) -> &'static str {
            "only"
        }
    }

    #[test]
    fn test_empty_key_set_is_rejected() {
        let err = KeyRegistry::<EmptyKey>::new().unwrap_err();
        assert!(matches!(err, BindingError::NoKeys { .. }));
    }

    #[test]
    fn test_duplicate_raw_names_are_rejected() {
        let err = KeyRegistry::<ClashKey>::new().unwrap_err();
        assert_eq!(
            err,
            BindingError::DuplicateRawName {
                record: record_name::<ClashKey>(),
                name: "same".to_string(),
            }
        );
    }

    #[test]
    fn test_repeated_key_is_rejected() {
        let err = KeyRegistry::<RepeatKey>::new().unwrap_err();
        assert!(matches!(err, BindingError::DuplicateKey { ref key, .. } if key == "Only"));
    }
}
