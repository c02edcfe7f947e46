//! Table-level constraints and indexed column references.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::column::{ConflictAction, Order};
use super::identifier::quote_identifier;

/// Column reference inside an index or a multi-column key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedColumn {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
}

impl IndexedColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collate: None,
            order: None,
        }
    }

    pub fn collate(mut self, collation: impl Into<String>) -> Self {
        self.collate = Some(collation.into());
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }
}

impl fmt::Display for IndexedColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&quote_identifier(&self.name))?;
        if let Some(collation) = &self.collate {
            write!(f, " COLLATE {}", quote_identifier(collation))?;
        }
        if let Some(order) = &self.order {
            write!(f, " {}", order)?;
        }
        Ok(())
    }
}

pub(crate) fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Action taken on the child row when a referenced row changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ForeignKeyAction {
    SetNull,
    SetDefault,
    Cascade,
    Restrict,
    NoAction,
}

impl fmt::Display for ForeignKeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            ForeignKeyAction::SetNull => "SET NULL",
            ForeignKeyAction::SetDefault => "SET DEFAULT",
            ForeignKeyAction::Cascade => "CASCADE",
            ForeignKeyAction::Restrict => "RESTRICT",
            ForeignKeyAction::NoAction => "NO ACTION",
        };
        f.write_str(action)
    }
}

/// `REFERENCES` clause of a foreign key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKeyClause {
    pub table: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<ForeignKeyAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_update: Option<ForeignKeyAction>,
    #[serde(default)]
    pub deferrable: bool,
}

impl ForeignKeyClause {
    pub fn references<I, S>(table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            on_delete: None,
            on_update: None,
            deferrable: false,
        }
    }

    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = Some(action);
        self
    }

    /// Defer the check to commit time (`DEFERRABLE INITIALLY DEFERRED`).
    pub fn deferrable(mut self) -> Self {
        self.deferrable = true;
        self
    }
}

impl fmt::Display for ForeignKeyClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REFERENCES {}", quote_identifier(&self.table))?;
        if !self.columns.is_empty() {
            let columns: Vec<_> = self.columns.iter().map(|c| quote_identifier(c)).collect();
            f.write_str("(")?;
            write_list(f, &columns)?;
            f.write_str(")")?;
        }
        if let Some(action) = &self.on_delete {
            write!(f, " ON DELETE {}", action)?;
        }
        if let Some(action) = &self.on_update {
            write!(f, " ON UPDATE {}", action)?;
        }
        if self.deferrable {
            f.write_str(" DEFERRABLE INITIALLY DEFERRED")?;
        }
        Ok(())
    }
}

/// Kind of a table-level constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TableConstraintKind {
    PrimaryKey {
        columns: Vec<IndexedColumn>,
        conflict: Option<ConflictAction>,
    },
    Unique {
        columns: Vec<IndexedColumn>,
        conflict: Option<ConflictAction>,
    },
    Check(String),
    ForeignKey {
        columns: Vec<String>,
        clause: ForeignKeyClause,
    },
}

/// Constraint spanning the whole table rather than one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConstraint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub kind: TableConstraintKind,
}

impl TableConstraint {
    pub fn primary_key(columns: Vec<IndexedColumn>) -> Self {
        Self::from_kind(TableConstraintKind::PrimaryKey {
            columns,
            conflict: None,
        })
    }

    pub fn unique(columns: Vec<IndexedColumn>) -> Self {
        Self::from_kind(TableConstraintKind::Unique {
            columns,
            conflict: None,
        })
    }

    pub fn check(expression: impl Into<String>) -> Self {
        Self::from_kind(TableConstraintKind::Check(expression.into()))
    }

    pub fn foreign_key(columns: Vec<String>, clause: ForeignKeyClause) -> Self {
        Self::from_kind(TableConstraintKind::ForeignKey { columns, clause })
    }

    fn from_kind(kind: TableConstraintKind) -> Self {
        Self { name: None, kind }
    }

    /// Name the constraint (`CONSTRAINT <name> ...`).
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a conflict clause; ignored for check and foreign key constraints.
    pub fn on_conflict(mut self, action: ConflictAction) -> Self {
        match &mut self.kind {
            TableConstraintKind::PrimaryKey { conflict, .. }
            | TableConstraintKind::Unique { conflict, .. } => *conflict = Some(action),
            TableConstraintKind::Check(_) | TableConstraintKind::ForeignKey { .. } => {}
        }
        self
    }

    pub fn is_primary_key(&self) -> bool {
        matches!(self.kind, TableConstraintKind::PrimaryKey { .. })
    }

    pub fn keyword(&self) -> &'static str {
        match self.kind {
            TableConstraintKind::PrimaryKey { .. } => "PRIMARY KEY",
            TableConstraintKind::Unique { .. } => "UNIQUE",
            TableConstraintKind::Check(_) => "CHECK",
            TableConstraintKind::ForeignKey { .. } => "FOREIGN KEY",
        }
    }

    /// Columns of this table the constraint names; empty for `CHECK`
    pub fn column_names(&self) -> Vec<&str> {
        match &self.kind {
            TableConstraintKind::PrimaryKey { columns, .. }
            | TableConstraintKind::Unique { columns, .. } => {
                columns.iter().map(|column| column.name.as_str()).collect()
            }
            TableConstraintKind::Check(_) => Vec::new(),
            TableConstraintKind::ForeignKey { columns, .. } => {
                columns.iter().map(String::as_str).collect()
            }
        }
    }
}

impl fmt::Display for TableConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "CONSTRAINT {} ", quote_identifier(name))?;
        }
        match &self.kind {
            TableConstraintKind::PrimaryKey { columns, conflict }
            | TableConstraintKind::Unique { columns, conflict } => {
                write!(f, "{}(", self.keyword())?;
                write_list(f, columns)?;
                f.write_str(")")?;
                if let Some(action) = conflict {
                    write!(f, " {}", action)?;
                }
                Ok(())
            }
            TableConstraintKind::Check(expression) => write!(f, "CHECK({})", expression),
            TableConstraintKind::ForeignKey { columns, clause } => {
                let columns: Vec<_> = columns.iter().map(|c| quote_identifier(c)).collect();
                f.write_str("FOREIGN KEY(")?;
                write_list(f, &columns)?;
                write!(f, ") {}", clause)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_primary_key() {
        let constraint = TableConstraint::primary_key(vec![
            IndexedColumn::new("owner"),
            IndexedColumn::new("slot").order(Order::Desc),
        ])
        .named("pk_inventory")
        .on_conflict(ConflictAction::Replace);

        assert!(constraint.is_primary_key());
        assert_eq!(constraint.column_names(), ["owner", "slot"]);
        assert_eq!(
            constraint.to_string(),
            "CONSTRAINT pk_inventory PRIMARY KEY(owner, slot DESC) ON CONFLICT REPLACE"
        );
    }

    #[test]
    fn test_foreign_key() {
        let clause = ForeignKeyClause::references("users", ["id"])
            .on_delete(ForeignKeyAction::Cascade)
            .deferrable();
        let constraint = TableConstraint::foreign_key(vec!["user_id".to_string()], clause);

        assert_eq!(
            constraint.to_string(),
            "FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE DEFERRABLE INITIALLY DEFERRED"
        );
    }

    #[test]
    fn test_check_ignores_conflict() {
        let constraint = TableConstraint::check("price >= 0").on_conflict(ConflictAction::Abort);
        assert!(constraint.column_names().is_empty());
        assert_eq!(constraint.to_string(), "CHECK(price >= 0)");
    }
}
