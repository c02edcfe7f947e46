//! Table bindings
//!
//! Derives schema statements for a record type from its coding keys:
//! - Key enumeration and per-key properties
//! - Column type resolution through the record's type oracle
//! - Column and table constraints, indexes and virtual table modules
//! - CREATE TABLE / CREATE INDEX / CREATE VIRTUAL TABLE generation

pub mod column_def;
pub mod column_type;
pub mod constraints;
pub mod error;
pub mod key;
pub mod options;
pub mod primary_key;
pub mod property;
mod schema;
pub mod table_binding;
pub mod table_config;
pub mod virtual_table;

pub use column_def::ColumnDefBuilder;
pub use column_type::{ColumnTypeOracle, ColumnTypeResolver};
pub use constraints::{ConstraintStore, IndexSpec};
pub use error::{BindingError, BindingResult};
pub use key::{CodingTableKey, KeyRegistry};
pub use options::{BindingOptions, BindingOptionsBuilder};
pub use primary_key::PrimaryKeyResolver;
pub use property::{Property, PropertyMap};
pub use table_binding::{TableBinding, TableBindingBuilder};
pub use table_config::{
    CheckExpressionConfig, ColumnConstraintConfig, ForeignKeyConfig, IndexConfig,
    MultiPrimaryConfig, MultiUniqueConfig, TableConfiguration,
};
pub use virtual_table::{VirtualTableConfig, VirtualTableModule};
