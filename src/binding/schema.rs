//! Schema statement generation for sealed bindings.
//!
//! Every method here is a pure function of the sealed binding and the table name,
//! so calling it twice yields equal statements.

use tracing::error;

use super::error::{BindingError, BindingResult};
use super::key::CodingTableKey;
use super::table_binding::TableBinding;
use crate::statement::{
    ColumnDef, StatementCreateIndex, StatementCreateTable, StatementCreateVirtualTable,
    quote_identifier,
};

impl<K: CodingTableKey> TableBinding<K> {
    /// `CREATE TABLE` for `table` with every column in key order and every table
    /// constraint.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let statement = binding.create_table_statement("messages");
    /// assert_eq!(
    ///     statement.to_string(),
    ///     "CREATE TABLE IF NOT EXISTS messages(id INTEGER PRIMARY KEY, body TEXT)"
    /// );
    /// ```
    pub fn create_table_statement(&self, table: &str) -> StatementCreateTable {
        let options = self.options();
        let mut statement = StatementCreateTable::create(table)
            .with_columns(self.column_defs().iter().cloned())
            .constraints(self.constraints().table_constraints().iter().cloned());
        if options.if_not_exists {
            statement = statement.if_not_exists();
        }
        if let Some(schema) = &options.schema_name {
            statement = statement.schema(schema.clone());
        }
        if options.without_rowid {
            statement = statement.without_rowid();
        }
        statement
    }

    /// One `CREATE INDEX` per registered index, named `<table><suffix>` and
    /// ordered by suffix. Empty when no index is registered.
    pub fn create_index_statements(&self, table: &str) -> Vec<StatementCreateIndex> {
        let options = self.options();
        self.constraints()
            .indexes()
            .iter()
            .map(|(suffix, spec)| {
                let mut statement = spec.to_statement(&format!("{}{}", table, suffix), table);
                if options.if_not_exists {
                    statement = statement.if_not_exists();
                }
                if let Some(schema) = &options.schema_name {
                    statement = statement.schema(schema.clone());
                }
                statement
            })
            .collect()
    }

    /// `CREATE VIRTUAL TABLE` for `table` using the configured module.
    ///
    /// Module parameters come first, then one argument per column in key order.
    /// FTS5 takes bare column names, with `UNINDEXED` appended for not-indexed
    /// columns; other modules take the full column definition.
    pub fn create_virtual_table_statement(
        &self,
        table: &str,
    ) -> BindingResult<StatementCreateVirtualTable> {
        let Some(config) = self.constraints().virtual_table() else {
            let e = BindingError::MissingVirtualTable {
                record: self.record_name(),
            };
            error!("Cannot create virtual table {}: {}", table, e);
            return Err(e);
        };

        let bare_names = config.module().uses_bare_column_names();
        let columns = self.column_defs().iter().map(|column_def| {
            if bare_names {
                bare_column_argument(column_def)
            } else {
                column_def.to_string()
            }
        });
        let arguments: Vec<String> = config.parameters().iter().cloned().chain(columns).collect();

        let options = self.options();
        let mut statement = StatementCreateVirtualTable::create(table)
            .using(config.module().name())
            .arguments(arguments);
        if options.if_not_exists {
            statement = statement.if_not_exists();
        }
        if let Some(schema) = &options.schema_name {
            statement = statement.schema(schema.clone());
        }
        Ok(statement)
    }
}

fn bare_column_argument(column_def: &ColumnDef) -> String {
    let name = quote_identifier(column_def.name());
    if column_def.is_not_indexed() {
        format!("{} UNINDEXED", name)
    } else {
        name.into_owned()
    }
}
