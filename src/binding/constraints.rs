//! Constraint store populated by the configuration pass.
//!
//! The store holds what a binding was told, not what it derived: column
//! constraints by raw name, table constraints, index specs by name suffix and the
//! optional virtual table module. Cross-key rules (such as the single primary key)
//! are checked when the binding is sealed.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

use super::error::{BindingError, BindingResult};
use super::virtual_table::VirtualTableConfig;
use crate::statement::{
    ColumnConstraint, IndexedColumn, StatementCreateIndex, TableConstraint, TableConstraintKind,
};

/// Index registered on a binding, independent of the table it is created on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSpec {
    columns: Vec<IndexedColumn>,
    #[serde(default)]
    unique: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    condition: Option<String>,
}

impl IndexSpec {
    pub fn new(columns: impl IntoIterator<Item = IndexedColumn>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
            unique: false,
            condition: None,
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Restrict the index to rows matching `condition`.
    pub fn where_clause(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn columns(&self) -> &[IndexedColumn] {
        &self.columns
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Statement creating this index as `name` on `table`
    pub fn to_statement(&self, name: &str, table: &str) -> StatementCreateIndex {
        let mut statement = StatementCreateIndex::create(name)
            .on(table)
            .indexed_by(self.columns.iter().cloned());
        if self.unique {
            statement = statement.unique();
        }
        if let Some(condition) = &self.condition {
            statement = statement.where_clause(condition.clone());
        }
        statement
    }
}

/// Constraints, indexes and virtual table module attached to a binding
#[derive(Debug, Clone, Default)]
pub struct ConstraintStore {
    column_constraints: HashMap<String, Vec<ColumnConstraint>>,
    table_constraints: Vec<TableConstraint>,
    indexes: BTreeMap<String, IndexSpec>,
    virtual_table: Option<VirtualTableConfig>,
}

impl ConstraintStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a constraint to the column stored under `raw_name`.
    pub fn add_column_constraint(&mut self, raw_name: &str, constraint: ColumnConstraint) {
        self.column_constraints
            .entry(raw_name.to_string())
            .or_default()
            .push(constraint);
    }

    pub fn add_table_constraint(&mut self, constraint: TableConstraint) {
        self.table_constraints.push(constraint);
    }

    /// Register `spec` under `suffix`, replacing any index with the same suffix.
    pub fn add_index(&mut self, suffix: &str, spec: IndexSpec) {
        if self.indexes.insert(suffix.to_string(), spec).is_some() {
            warn!("Replaced index registered under suffix '{}'", suffix);
        }
    }

    /// Attach the virtual table module. Only one module may be attached.
    pub fn set_virtual_table(&mut self, config: VirtualTableConfig) -> BindingResult<()> {
        if let Some(existing) = &self.virtual_table {
            return Err(BindingError::VirtualTableAlreadyConfigured {
                existing: existing.module().to_string(),
            });
        }
        self.virtual_table = Some(config);
        Ok(())
    }

    /// Constraints of one column in insertion order; empty if none were added
    pub fn column_constraints(&self, raw_name: &str) -> &[ColumnConstraint] {
        self.column_constraints
            .get(raw_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Raw names that have at least one column constraint
    pub fn constrained_columns(&self) -> impl Iterator<Item = &str> {
        self.column_constraints.keys().map(String::as_str)
    }

    /// Raw names referred to by column constraints, table constraints and indexes.
    /// A name may appear more than once.
    pub fn referenced_columns(&self) -> impl Iterator<Item = &str> {
        self.constrained_columns()
            .chain(
                self.table_constraints
                    .iter()
                    .flat_map(TableConstraint::column_names),
            )
            .chain(
                self.indexes
                    .values()
                    .flat_map(|spec| spec.columns.iter().map(|column| column.name.as_str())),
            )
    }

    /// First table constraint or index that would render an empty column list
    pub fn empty_column_list(&self) -> Option<String> {
        let constraint = self.table_constraints.iter().find(|constraint| {
            !matches!(constraint.kind, TableConstraintKind::Check(_))
                && constraint.column_names().is_empty()
        });
        if let Some(constraint) = constraint {
            return Some(format!("{} constraint", constraint.keyword()));
        }
        self.indexes
            .iter()
            .find(|(_, spec)| spec.columns.is_empty())
            .map(|(suffix, _)| format!("index {}", suffix))
    }

    pub fn table_constraints(&self) -> &[TableConstraint] {
        &self.table_constraints
    }

    /// Index specs ordered by suffix
    pub fn indexes(&self) -> &BTreeMap<String, IndexSpec> {
        &self.indexes
    }

    pub fn virtual_table(&self) -> Option<&VirtualTableConfig> {
        self.virtual_table.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_constraints_keep_insertion_order() {
        let mut store = ConstraintStore::new();
        store.add_column_constraint("name", ColumnConstraint::not_null());
        store.add_column_constraint("name", ColumnConstraint::collate("NOCASE"));

        assert_eq!(
            store.column_constraints("name"),
            [ColumnConstraint::not_null(), ColumnConstraint::collate("NOCASE")]
        );
        assert!(store.column_constraints("missing").is_empty());
    }

    #[test]
    fn test_virtual_table_is_set_once() {
        let mut store = ConstraintStore::new();
        store.set_virtual_table(VirtualTableConfig::fts5()).unwrap();

        let err = store.set_virtual_table(VirtualTableConfig::fts4()).unwrap_err();
        assert_eq!(
            err,
            BindingError::VirtualTableAlreadyConfigured {
                existing: "fts5".to_string()
            }
        );
        assert_eq!(store.virtual_table(), Some(&VirtualTableConfig::fts5()));
    }

    #[test]
    fn test_index_suffix_replaces_previous_spec() {
        let mut store = ConstraintStore::new();
        store.add_index("_by_name", IndexSpec::new([IndexedColumn::new("name")]));
        store.add_index("_by_name", IndexSpec::new([IndexedColumn::new("name")]).unique());

        assert_eq!(store.indexes().len(), 1);
        assert!(store.indexes()["_by_name"].is_unique());
    }

    #[test]
    fn test_referenced_columns_cover_every_kind() {
        let mut store = ConstraintStore::new();
        store.add_column_constraint("name", ColumnConstraint::not_null());
        store.add_table_constraint(TableConstraint::unique(vec![IndexedColumn::new("email")]));
        store.add_table_constraint(TableConstraint::check("age > 0"));
        store.add_index("_by_city", IndexSpec::new([IndexedColumn::new("city")]));

        let mut columns: Vec<_> = store.referenced_columns().collect();
        columns.sort_unstable();
        assert_eq!(columns, ["city", "email", "name"]);
        assert_eq!(store.empty_column_list(), None);
    }

    #[test]
    fn test_empty_column_lists_are_found() {
        let mut store = ConstraintStore::new();
        store.add_index("_nothing", IndexSpec::new(Vec::new()));
        assert_eq!(store.empty_column_list(), Some("index _nothing".to_string()));

        store.add_table_constraint(TableConstraint::primary_key(Vec::new()));
        assert_eq!(
            store.empty_column_list(),
            Some("PRIMARY KEY constraint".to_string())
        );
    }
}
