//! Schema statement descriptors.
//!
//! Each descriptor is plain data with a fluent builder and a `Display` impl that
//! renders the SQLite statement text.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::column::ColumnDef;
use super::identifier::{qualified_name, quote_identifier};
use super::table_constraint::{IndexedColumn, TableConstraint, write_list};

fn write_if_not_exists(f: &mut fmt::Formatter<'_>, if_not_exists: bool) -> fmt::Result {
    if if_not_exists {
        f.write_str("IF NOT EXISTS ")?;
    }
    Ok(())
}

/// `CREATE TABLE` statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementCreateTable {
    #[serde(skip_serializing_if = "Option::is_none")]
    schema: Option<String>,
    table: String,
    if_not_exists: bool,
    columns: Vec<ColumnDef>,
    #[serde(default)]
    constraints: Vec<TableConstraint>,
    #[serde(default)]
    without_rowid: bool,
}

impl StatementCreateTable {
    pub fn create(table: impl Into<String>) -> Self {
        Self {
            schema: None,
            table: table.into(),
            if_not_exists: false,
            columns: Vec::new(),
            constraints: Vec::new(),
            without_rowid: false,
        }
    }

    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_columns(mut self, columns: impl IntoIterator<Item = ColumnDef>) -> Self {
        self.columns.extend(columns);
        self
    }

    pub fn constraints(mut self, constraints: impl IntoIterator<Item = TableConstraint>) -> Self {
        self.constraints.extend(constraints);
        self
    }

    pub fn without_rowid(mut self) -> Self {
        self.without_rowid = true;
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn schema_name(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn is_if_not_exists(&self) -> bool {
        self.if_not_exists
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn table_constraints(&self) -> &[TableConstraint] {
        &self.constraints
    }

    pub fn is_without_rowid(&self) -> bool {
        self.without_rowid
    }
}

impl fmt::Display for StatementCreateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE TABLE ")?;
        write_if_not_exists(f, self.if_not_exists)?;
        write!(f, "{}(", qualified_name(self.schema.as_deref(), &self.table))?;
        write_list(f, &self.columns)?;
        if !self.constraints.is_empty() {
            f.write_str(", ")?;
            write_list(f, &self.constraints)?;
        }
        f.write_str(")")?;
        if self.without_rowid {
            f.write_str(" WITHOUT ROWID")?;
        }
        Ok(())
    }
}

/// `CREATE INDEX` statement
///
/// Registered index specs carry only the indexed columns; the name and target
/// table are filled in when statements are generated for a concrete table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementCreateIndex {
    #[serde(skip_serializing_if = "Option::is_none")]
    schema: Option<String>,
    name: String,
    table: String,
    unique: bool,
    if_not_exists: bool,
    columns: Vec<IndexedColumn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    where_clause: Option<String>,
}

impl StatementCreateIndex {
    pub fn create(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
            table: String::new(),
            unique: false,
            if_not_exists: false,
            columns: Vec::new(),
            where_clause: None,
        }
    }

    pub fn on(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn indexed_by(mut self, columns: impl IntoIterator<Item = IndexedColumn>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Make this a partial index.
    pub fn where_clause(mut self, condition: impl Into<String>) -> Self {
        self.where_clause = Some(condition.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn schema_name(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn is_if_not_exists(&self) -> bool {
        self.if_not_exists
    }

    pub fn columns(&self) -> &[IndexedColumn] {
        &self.columns
    }

    pub fn condition(&self) -> Option<&str> {
        self.where_clause.as_deref()
    }
}

impl fmt::Display for StatementCreateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.unique {
            f.write_str("UNIQUE ")?;
        }
        f.write_str("INDEX ")?;
        write_if_not_exists(f, self.if_not_exists)?;
        write!(
            f,
            "{} ON {}(",
            qualified_name(self.schema.as_deref(), &self.name),
            quote_identifier(&self.table)
        )?;
        write_list(f, &self.columns)?;
        f.write_str(")")?;
        if let Some(condition) = &self.where_clause {
            write!(f, " WHERE {}", condition)?;
        }
        Ok(())
    }
}

/// `CREATE VIRTUAL TABLE` statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementCreateVirtualTable {
    #[serde(skip_serializing_if = "Option::is_none")]
    schema: Option<String>,
    table: String,
    if_not_exists: bool,
    module: String,
    #[serde(default)]
    arguments: Vec<String>,
}

impl StatementCreateVirtualTable {
    pub fn create(table: impl Into<String>) -> Self {
        Self {
            schema: None,
            table: table.into(),
            if_not_exists: false,
            module: String::new(),
            arguments: Vec::new(),
        }
    }

    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn using(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    pub fn arguments(mut self, arguments: impl IntoIterator<Item = String>) -> Self {
        self.arguments.extend(arguments);
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn schema_name(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn is_if_not_exists(&self) -> bool {
        self.if_not_exists
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn module_arguments(&self) -> &[String] {
        &self.arguments
    }
}

impl fmt::Display for StatementCreateVirtualTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE VIRTUAL TABLE ")?;
        write_if_not_exists(f, self.if_not_exists)?;
        write!(
            f,
            "{} USING {}",
            qualified_name(self.schema.as_deref(), &self.table),
            self.module
        )?;
        if !self.arguments.is_empty() {
            f.write_str("(")?;
            write_list(f, &self.arguments)?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::{ColumnConstraint, ColumnType};

    #[test]
    fn test_create_table_rendering() {
        let statement = StatementCreateTable::create("messages")
            .if_not_exists()
            .schema("main")
            .with_columns([
                ColumnDef::new("id", ColumnType::Integer)
                    .with_constraint(ColumnConstraint::primary_key()),
                ColumnDef::new("body", ColumnType::Text),
            ])
            .constraints([TableConstraint::check("length(body) > 0")])
            .without_rowid();

        assert_eq!(
            statement.to_string(),
            "CREATE TABLE IF NOT EXISTS main.messages(id INTEGER PRIMARY KEY, body TEXT, CHECK(length(body) > 0)) WITHOUT ROWID"
        );
    }

    #[test]
    fn test_create_index_rendering() {
        let statement = StatementCreateIndex::create("messages_sender_index")
            .on("messages")
            .unique()
            .if_not_exists()
            .indexed_by([IndexedColumn::new("sender"), IndexedColumn::new("sent_at")])
            .where_clause("sender IS NOT NULL");

        assert_eq!(
            statement.to_string(),
            "CREATE UNIQUE INDEX IF NOT EXISTS messages_sender_index ON messages(sender, sent_at) WHERE sender IS NOT NULL"
        );
    }

    #[test]
    fn test_create_virtual_table_rendering() {
        let statement = StatementCreateVirtualTable::create("search")
            .using("fts5")
            .arguments(["title".to_string(), "body UNINDEXED".to_string()]);

        assert_eq!(
            statement.to_string(),
            "CREATE VIRTUAL TABLE search USING fts5(title, body UNINDEXED)"
        );
    }
}
