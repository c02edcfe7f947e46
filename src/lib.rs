//! Table Binding SDK - typed schema bindings for SQLite record types
//!
//! Provides:
//! - Declarative coding keys for record types
//! - Per-key properties and column type resolution
//! - Column/table constraints, indexes and virtual table modules
//! - Structured CREATE TABLE / CREATE INDEX / CREATE VIRTUAL TABLE statements

pub mod binding;
pub mod statement;

// Re-export commonly used types
pub use binding::{
    BindingError, BindingOptions, BindingResult, CodingTableKey, ColumnTypeOracle, IndexConfig,
    IndexSpec, Property, TableBinding, TableBindingBuilder, TableConfiguration,
    VirtualTableConfig, VirtualTableModule,
};
pub use statement::{
    ColumnCodable, ColumnConstraint, ColumnDef, ColumnType, StatementCreateIndex,
    StatementCreateTable, StatementCreateVirtualTable, TableConstraint,
};
