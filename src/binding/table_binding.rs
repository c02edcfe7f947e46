//! Table binding and its configuration builder.
//!
//! A [`TableBindingBuilder`] collects constraints, indexes and the virtual table
//! module for one record type. [`TableBindingBuilder::build`] seals it: keys are
//! enumerated, properties created, column types resolved, column definitions
//! assembled and the primary key resolved, all at once. The sealed
//! [`TableBinding`] never changes afterwards and can be shared between threads.

use std::collections::HashMap;
use tracing::{debug, error};

use super::column_def::ColumnDefBuilder;
use super::column_type::ColumnTypeResolver;
use super::constraints::{ConstraintStore, IndexSpec};
use super::error::{BindingError, BindingResult};
use super::key::{CodingTableKey, KeyRegistry, record_name, unbound_key};
use super::options::BindingOptions;
use super::primary_key::PrimaryKeyResolver;
use super::property::{Property, PropertyMap};
use super::table_config::{
    CheckExpressionConfig, ColumnConstraintConfig, ForeignKeyConfig, MultiPrimaryConfig,
    MultiUniqueConfig, TableConfiguration,
};
use super::virtual_table::VirtualTableConfig;
use crate::statement::{
    ColumnConstraint, ColumnDef, ColumnType, ForeignKeyClause, LiteralValue, TableConstraint,
};

/// Schema binding for the record type behind `K`
#[derive(Debug, Clone)]
pub struct TableBinding<K: CodingTableKey> {
    registry: KeyRegistry<K>,
    properties: PropertyMap<K>,
    store: ConstraintStore,
    column_types: HashMap<&'static str, ColumnType>,
    column_defs: Vec<ColumnDef>,
    primary_key: Option<K>,
    options: BindingOptions,
}

impl<K: CodingTableKey> TableBinding<K> {
    /// Start configuring a binding
    pub fn builder() -> TableBindingBuilder<K> {
        TableBindingBuilder::new()
    }

    /// Bind `K` without any constraints, indexes or virtual table module
    pub fn new() -> BindingResult<Self> {
        Self::builder().build()
    }

    /// Keys in column order
    pub fn keys(&self) -> &[K] {
        self.registry.keys()
    }

    /// Property for `key`. Always the same instance for the same key.
    pub fn property(&self, key: K) -> BindingResult<&Property<K>> {
        self.properties.property(key)
    }

    /// Properties in column order
    pub fn properties(&self) -> &[Property<K>] {
        self.properties.all()
    }

    /// Column definitions in key order
    pub fn column_defs(&self) -> &[ColumnDef] {
        &self.column_defs
    }

    pub fn column_type(&self, key: K) -> Option<ColumnType> {
        self.column_types.get(key.raw_name()).copied()
    }

    /// Key of the single-column primary key, if one is configured
    pub fn primary_key(&self) -> Option<K> {
        self.primary_key
    }

    pub fn constraints(&self) -> &ConstraintStore {
        &self.store
    }

    pub fn options(&self) -> &BindingOptions {
        &self.options
    }

    pub fn record_name(&self) -> &'static str {
        self.registry.record_name()
    }
}

/// Configuration pass for a [`TableBinding`].
///
/// The first configuration error is kept and reported by [`build`](Self::build);
/// later steps still run so the builder can be chained.
pub struct TableBindingBuilder<K: CodingTableKey> {
    store: ConstraintStore,
    options: BindingOptions,
    configured_keys: Vec<K>,
    first_error: Option<BindingError>,
}

impl<K: CodingTableKey> Default for TableBindingBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: CodingTableKey> TableBindingBuilder<K> {
    pub fn new() -> Self {
        Self {
            store: ConstraintStore::new(),
            options: BindingOptions::default(),
            configured_keys: Vec::new(),
            first_error: None,
        }
    }

    /// Apply one configuration object
    pub fn configure<C: TableConfiguration<K>>(mut self, config: C) -> Self {
        self.apply(&config);
        self
    }

    /// Apply configuration objects in order
    pub fn configure_all<I>(mut self, configs: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn TableConfiguration<K>>>,
    {
        for config in configs {
            self.apply(config.as_ref());
        }
        self
    }

    fn apply(&mut self, config: &dyn TableConfiguration<K>) {
        self.configured_keys.extend(config.keys());
        if let Err(e) = config.configure(&mut self.store)
            && self.first_error.is_none()
        {
            self.first_error = Some(e);
        }
    }

    /// Attach a column constraint to `key`
    pub fn constraint(self, key: K, constraint: ColumnConstraint) -> Self {
        self.configure(ColumnConstraintConfig::new(key, [constraint]))
    }

    pub fn primary_key(self, key: K) -> Self {
        self.constraint(key, ColumnConstraint::primary_key())
    }

    /// `INTEGER PRIMARY KEY AUTOINCREMENT` style key
    pub fn autoincrement_primary_key(self, key: K) -> Self {
        self.constraint(key, ColumnConstraint::primary_key().autoincrement())
    }

    pub fn not_null(self, key: K) -> Self {
        self.constraint(key, ColumnConstraint::not_null())
    }

    pub fn unique(self, key: K) -> Self {
        self.constraint(key, ColumnConstraint::unique())
    }

    /// Keep the column out of a full-text index
    pub fn not_indexed(self, key: K) -> Self {
        self.constraint(key, ColumnConstraint::not_indexed())
    }

    pub fn default_value(self, key: K, value: impl Into<LiteralValue>) -> Self {
        self.constraint(key, ColumnConstraint::default_value(value))
    }

    pub fn collate(self, key: K, collation: impl Into<String>) -> Self {
        self.constraint(key, ColumnConstraint::collate(collation))
    }

    pub fn table_constraint(mut self, constraint: TableConstraint) -> Self {
        self.store.add_table_constraint(constraint);
        self
    }

    /// Composite primary key over `keys`
    pub fn multi_primary(self, keys: impl IntoIterator<Item = K>) -> Self {
        self.configure(MultiPrimaryConfig::new(keys))
    }

    pub fn multi_unique(self, keys: impl IntoIterator<Item = K>) -> Self {
        self.configure(MultiUniqueConfig::new(keys))
    }

    pub fn check(self, expression: impl Into<String>) -> Self {
        self.configure(CheckExpressionConfig::new(expression))
    }

    pub fn foreign_key(self, keys: impl IntoIterator<Item = K>, clause: ForeignKeyClause) -> Self {
        self.configure(ForeignKeyConfig::new(keys, clause))
    }

    /// Register an index created as `<table><suffix>`. Column names are raw
    /// names and must belong to bound keys.
    pub fn index(mut self, suffix: &str, spec: IndexSpec) -> Self {
        self.store.add_index(suffix, spec);
        self
    }

    /// Make the table a virtual table. May be called once.
    pub fn virtual_table(self, config: VirtualTableConfig) -> Self {
        self.configure(config)
    }

    pub fn options(mut self, options: BindingOptions) -> Self {
        self.options = options;
        self
    }

    /// Seal the configuration into an immutable binding.
    pub fn build(self) -> BindingResult<TableBinding<K>> {
        let record = record_name::<K>();
        self.seal().inspect_err(|e| {
            error!("Failed to bind record type {}: {}", record, e);
        })
    }

    fn seal(self) -> BindingResult<TableBinding<K>> {
        if let Some(e) = self.first_error {
            return Err(e);
        }

        let registry = KeyRegistry::<K>::new()?;
        if let Some(target) = self.store.empty_column_list() {
            return Err(BindingError::EmptyColumnList {
                record: registry.record_name(),
                target,
            });
        }
        if let Some(key) = self
            .configured_keys
            .iter()
            .copied()
            .find(|key| !registry.contains(*key))
        {
            return Err(unbound_key(key));
        }
        if let Some(raw_name) = self
            .store
            .referenced_columns()
            .find(|raw_name| registry.key_named(raw_name).is_none())
        {
            return Err(BindingError::UnboundKey {
                record: registry.record_name(),
                key: raw_name.to_string(),
            });
        }

        let properties = PropertyMap::build(&registry);
        let column_types = ColumnTypeResolver::resolve(&registry)?;
        let column_defs = ColumnDefBuilder::build(&registry, &column_types, &self.store)?;
        let primary_key = PrimaryKeyResolver::resolve(&registry, &self.store)?;

        debug!(
            "Bound record type {} with {} columns, primary key {:?}, {} indexes, virtual table module {:?}",
            registry.record_name(),
            column_defs.len(),
            primary_key,
            self.store.indexes().len(),
            self.store.virtual_table().map(|config| config.module().name()),
        );

        Ok(TableBinding {
            registry,
            properties,
            store: self.store,
            column_types,
            column_defs,
            primary_key,
            options: self.options,
        })
    }
}
