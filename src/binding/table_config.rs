//! Declarative table configuration objects.
//!
//! Each configuration describes one rule (a column constraint, a multi-column
//! key, an index, a virtual table module) and knows how to record itself in a
//! [`ConstraintStore`]. Bindings can be configured from a list of them:
//!
//! ```rust,ignore
//! TableBinding::<MessageKey>::builder()
//!     .configure_all(vec![
//!         Box::new(ColumnConstraintConfig::primary_key(MessageKey::Id)),
//!         Box::new(IndexConfig::new("_sender_index", [MessageKey::Sender])),
//!         Box::new(VirtualTableConfig::fts5()),
//!     ])
//!     .build()?;
//! ```

use super::constraints::{ConstraintStore, IndexSpec};
use super::error::BindingResult;
use super::key::CodingTableKey;
use super::virtual_table::VirtualTableConfig;
use crate::statement::{
    ColumnConstraint, ConflictAction, ForeignKeyClause, IndexedColumn, TableConstraint,
};

/// One configuration step applied before a binding is sealed
pub trait TableConfiguration<K: CodingTableKey> {
    fn configure(&self, store: &mut ConstraintStore) -> BindingResult<()>;

    /// Keys the configuration refers to. Each must be bound to the record type.
    fn keys(&self) -> Vec<K> {
        Vec::new()
    }
}

fn indexed_columns<K: CodingTableKey>(keys: &[K]) -> Vec<IndexedColumn> {
    keys.iter().map(|key| IndexedColumn::new(key.raw_name())).collect()
}

/// Constraints for a single column
#[derive(Debug, Clone)]
pub struct ColumnConstraintConfig<K: CodingTableKey> {
    key: K,
    constraints: Vec<ColumnConstraint>,
}

impl<K: CodingTableKey> ColumnConstraintConfig<K> {
    pub fn new(key: K, constraints: impl IntoIterator<Item = ColumnConstraint>) -> Self {
        Self {
            key,
            constraints: constraints.into_iter().collect(),
        }
    }

    pub fn primary_key(key: K) -> Self {
        Self::new(key, [ColumnConstraint::primary_key()])
    }

    pub fn not_null(key: K) -> Self {
        Self::new(key, [ColumnConstraint::not_null()])
    }

    pub fn unique(key: K) -> Self {
        Self::new(key, [ColumnConstraint::unique()])
    }

    pub fn not_indexed(key: K) -> Self {
        Self::new(key, [ColumnConstraint::not_indexed()])
    }

    pub fn key(&self) -> K {
        self.key
    }
}

impl<K: CodingTableKey> TableConfiguration<K> for ColumnConstraintConfig<K> {
    fn configure(&self, store: &mut ConstraintStore) -> BindingResult<()> {
        for constraint in &self.constraints {
            store.add_column_constraint(self.key.raw_name(), constraint.clone());
        }
        Ok(())
    }

    fn keys(&self) -> Vec<K> {
        vec![self.key]
    }
}

/// Composite primary key over several columns
#[derive(Debug, Clone)]
pub struct MultiPrimaryConfig<K: CodingTableKey> {
    keys: Vec<K>,
    conflict: Option<ConflictAction>,
}

impl<K: CodingTableKey> MultiPrimaryConfig<K> {
    pub fn new(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            conflict: None,
        }
    }

    pub fn on_conflict(mut self, action: ConflictAction) -> Self {
        self.conflict = Some(action);
        self
    }
}

impl<K: CodingTableKey> TableConfiguration<K> for MultiPrimaryConfig<K> {
    fn configure(&self, store: &mut ConstraintStore) -> BindingResult<()> {
        let mut constraint = TableConstraint::primary_key(indexed_columns(&self.keys));
        if let Some(action) = self.conflict {
            constraint = constraint.on_conflict(action);
        }
        store.add_table_constraint(constraint);
        Ok(())
    }

    fn keys(&self) -> Vec<K> {
        self.keys.clone()
    }
}

/// Uniqueness over a combination of columns
#[derive(Debug, Clone)]
pub struct MultiUniqueConfig<K: CodingTableKey> {
    keys: Vec<K>,
    conflict: Option<ConflictAction>,
}

impl<K: CodingTableKey> MultiUniqueConfig<K> {
    pub fn new(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            conflict: None,
        }
    }

    pub fn on_conflict(mut self, action: ConflictAction) -> Self {
        self.conflict = Some(action);
        self
    }
}

impl<K: CodingTableKey> TableConfiguration<K> for MultiUniqueConfig<K> {
    fn configure(&self, store: &mut ConstraintStore) -> BindingResult<()> {
        let mut constraint = TableConstraint::unique(indexed_columns(&self.keys));
        if let Some(action) = self.conflict {
            constraint = constraint.on_conflict(action);
        }
        store.add_table_constraint(constraint);
        Ok(())
    }

    fn keys(&self) -> Vec<K> {
        self.keys.clone()
    }
}

/// Table-level `CHECK` expression
#[derive(Debug, Clone)]
pub struct CheckExpressionConfig {
    expression: String,
}

impl CheckExpressionConfig {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
        }
    }
}

impl<K: CodingTableKey> TableConfiguration<K> for CheckExpressionConfig {
    fn configure(&self, store: &mut ConstraintStore) -> BindingResult<()> {
        store.add_table_constraint(TableConstraint::check(self.expression.clone()));
        Ok(())
    }
}

/// Foreign key from some of this table's columns to another table
#[derive(Debug, Clone)]
pub struct ForeignKeyConfig<K: CodingTableKey> {
    keys: Vec<K>,
    clause: ForeignKeyClause,
    name: Option<String>,
}

impl<K: CodingTableKey> ForeignKeyConfig<K> {
    pub fn new(keys: impl IntoIterator<Item = K>, clause: ForeignKeyClause) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            clause,
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl<K: CodingTableKey> TableConfiguration<K> for ForeignKeyConfig<K> {
    fn configure(&self, store: &mut ConstraintStore) -> BindingResult<()> {
        let columns = self
            .keys
            .iter()
            .map(|key| key.raw_name().to_string())
            .collect();
        let mut constraint = TableConstraint::foreign_key(columns, self.clause.clone());
        if let Some(name) = &self.name {
            constraint = constraint.named(name.clone());
        }
        store.add_table_constraint(constraint);
        Ok(())
    }

    fn keys(&self) -> Vec<K> {
        self.keys.clone()
    }
}

/// Index over one or more columns, created as `<table><suffix>`
#[derive(Debug, Clone)]
pub struct IndexConfig<K: CodingTableKey> {
    suffix: String,
    keys: Vec<K>,
    unique: bool,
    condition: Option<String>,
}

impl<K: CodingTableKey> IndexConfig<K> {
    pub fn new(suffix: impl Into<String>, keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            suffix: suffix.into(),
            keys: keys.into_iter().collect(),
            unique: false,
            condition: None,
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn where_clause(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }
}

impl<K: CodingTableKey> TableConfiguration<K> for IndexConfig<K> {
    fn configure(&self, store: &mut ConstraintStore) -> BindingResult<()> {
        let mut spec = IndexSpec::new(indexed_columns(&self.keys));
        if self.unique {
            spec = spec.unique();
        }
        if let Some(condition) = &self.condition {
            spec = spec.where_clause(condition.clone());
        }
        store.add_index(&self.suffix, spec);
        Ok(())
    }

    fn keys(&self) -> Vec<K> {
        self.keys.clone()
    }
}

impl<K: CodingTableKey> TableConfiguration<K> for VirtualTableConfig {
    fn configure(&self, store: &mut ConstraintStore) -> BindingResult<()> {
        store.set_virtual_table(self.clone())
    }
}
