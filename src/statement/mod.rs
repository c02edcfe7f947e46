//! Structured schema statements
//!
//! Descriptors handed out by table bindings:
//! - Column types, column constraints and column definitions
//! - Table constraints (multi-column keys, checks, foreign keys)
//! - CREATE TABLE / CREATE INDEX / CREATE VIRTUAL TABLE statements
//!
//! The binding layer only assembles these values; rendering to SQLite text lives
//! in their `Display` impls.

pub mod column;
pub mod create;
pub mod identifier;
pub mod table_constraint;

pub use column::{
    ColumnCodable, ColumnConstraint, ColumnDef, ColumnType, ConflictAction, LiteralValue, Order,
};
pub use create::{StatementCreateIndex, StatementCreateTable, StatementCreateVirtualTable};
pub use identifier::{is_reserved_word, qualified_name, quote_identifier};
pub use table_constraint::{
    ForeignKeyAction, ForeignKeyClause, IndexedColumn, TableConstraint, TableConstraintKind,
};
