//! Column-level descriptors: storage types, constraints and column definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::identifier::quote_identifier;

/// Storage type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Float,
    Text,
    Blob,
    Null,
}

impl ColumnType {
    /// SQL spelling of the type
    pub fn as_sql(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Float => "REAL",
            ColumnType::Text => "TEXT",
            ColumnType::Blob => "BLOB",
            ColumnType::Null => "NULL",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Rust field types with a fixed storage type.
///
/// Record types use this to describe their columns without inspecting values:
///
/// ```rust
/// use table_binding_sdk::statement::{ColumnCodable, ColumnType};
///
/// assert_eq!(<Option<String>>::COLUMN_TYPE, ColumnType::Text);
/// assert_eq!(i64::COLUMN_TYPE, ColumnType::Integer);
/// ```
pub trait ColumnCodable {
    const COLUMN_TYPE: ColumnType;
}

macro_rules! impl_column_codable {
    ($column_type:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl ColumnCodable for $ty {
                const COLUMN_TYPE: ColumnType = $column_type;
            }
        )+
    };
}

impl_column_codable!(ColumnType::Integer => bool, i8, i16, i32, i64, u8, u16, u32);
impl_column_codable!(ColumnType::Float => f32, f64);
impl_column_codable!(ColumnType::Text => String, &str, char);
impl_column_codable!(ColumnType::Blob => Vec<u8>);

impl<T: ColumnCodable> ColumnCodable for Option<T> {
    const COLUMN_TYPE: ColumnType = T::COLUMN_TYPE;
}

/// Conflict resolution clause (`ON CONFLICT ...`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictAction {
    Rollback,
    Abort,
    Fail,
    Ignore,
    Replace,
}

impl fmt::Display for ConflictAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            ConflictAction::Rollback => "ROLLBACK",
            ConflictAction::Abort => "ABORT",
            ConflictAction::Fail => "FAIL",
            ConflictAction::Ignore => "IGNORE",
            ConflictAction::Replace => "REPLACE",
        };
        write!(f, "ON CONFLICT {}", action)
    }
}

/// Sort order of a key or indexed column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    Desc,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Asc => f.write_str("ASC"),
            Order::Desc => f.write_str("DESC"),
        }
    }
}

/// Literal used by `DEFAULT` clauses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LiteralValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    Blob(Vec<u8>),
    CurrentTime,
    CurrentDate,
    CurrentTimestamp,
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Null => f.write_str("NULL"),
            LiteralValue::Integer(value) => write!(f, "{}", value),
            // SQLite has no NaN or infinity literal; 9e999 overflows to infinity
            LiteralValue::Float(value) if value.is_nan() => f.write_str("NULL"),
            LiteralValue::Float(value) if value.is_infinite() => {
                f.write_str(if *value > 0.0 { "9e999" } else { "-9e999" })
            }
            // Debug keeps the fractional part, so 1.0 stays a REAL literal
            LiteralValue::Float(value) => write!(f, "{:?}", value),
            LiteralValue::Text(value) => write!(f, "'{}'", value.replace('\'', "''")),
            LiteralValue::Blob(bytes) => {
                f.write_str("X'")?;
                for byte in bytes {
                    write!(f, "{:02X}", byte)?;
                }
                f.write_str("'")
            }
            LiteralValue::CurrentTime => f.write_str("CURRENT_TIME"),
            LiteralValue::CurrentDate => f.write_str("CURRENT_DATE"),
            LiteralValue::CurrentTimestamp => f.write_str("CURRENT_TIMESTAMP"),
        }
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        LiteralValue::Integer(value)
    }
}

impl From<i32> for LiteralValue {
    fn from(value: i32) -> Self {
        LiteralValue::Integer(value.into())
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        LiteralValue::Integer(value.into())
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        LiteralValue::Float(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        LiteralValue::Text(value.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        LiteralValue::Text(value)
    }
}

/// Constraint attached to a single column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnConstraint {
    PrimaryKey {
        order: Option<Order>,
        conflict: Option<ConflictAction>,
        autoincrement: bool,
    },
    NotNull {
        conflict: Option<ConflictAction>,
    },
    Unique {
        conflict: Option<ConflictAction>,
    },
    Check(String),
    Default(LiteralValue),
    Collate(String),
    /// Excludes the column from a full-text index (`UNINDEXED`).
    NotIndexed,
}

impl ColumnConstraint {
    pub fn primary_key() -> Self {
        ColumnConstraint::PrimaryKey {
            order: None,
            conflict: None,
            autoincrement: false,
        }
    }

    pub fn not_null() -> Self {
        ColumnConstraint::NotNull { conflict: None }
    }

    pub fn unique() -> Self {
        ColumnConstraint::Unique { conflict: None }
    }

    pub fn check(expression: impl Into<String>) -> Self {
        ColumnConstraint::Check(expression.into())
    }

    pub fn default_value(value: impl Into<LiteralValue>) -> Self {
        ColumnConstraint::Default(value.into())
    }

    pub fn collate(collation: impl Into<String>) -> Self {
        ColumnConstraint::Collate(collation.into())
    }

    pub fn not_indexed() -> Self {
        ColumnConstraint::NotIndexed
    }

    /// Mark a primary key as `AUTOINCREMENT`. Other constraints are returned unchanged.
    pub fn autoincrement(self) -> Self {
        match self {
            ColumnConstraint::PrimaryKey { order, conflict, .. } => ColumnConstraint::PrimaryKey {
                order,
                conflict,
                autoincrement: true,
            },
            other => other,
        }
    }

    /// Set the sort order of a primary key. Other constraints are returned unchanged.
    pub fn order(self, order: Order) -> Self {
        match self {
            ColumnConstraint::PrimaryKey {
                conflict,
                autoincrement,
                ..
            } => ColumnConstraint::PrimaryKey {
                order: Some(order),
                conflict,
                autoincrement,
            },
            other => other,
        }
    }

    /// Attach a conflict clause to a primary key, not-null or unique constraint.
    pub fn on_conflict(self, action: ConflictAction) -> Self {
        match self {
            ColumnConstraint::PrimaryKey {
                order,
                autoincrement,
                ..
            } => ColumnConstraint::PrimaryKey {
                order,
                conflict: Some(action),
                autoincrement,
            },
            ColumnConstraint::NotNull { .. } => ColumnConstraint::NotNull {
                conflict: Some(action),
            },
            ColumnConstraint::Unique { .. } => ColumnConstraint::Unique {
                conflict: Some(action),
            },
            other => other,
        }
    }

    pub fn is_primary_key(&self) -> bool {
        matches!(self, ColumnConstraint::PrimaryKey { .. })
    }

    pub fn is_not_indexed(&self) -> bool {
        matches!(self, ColumnConstraint::NotIndexed)
    }
}

fn write_conflict(f: &mut fmt::Formatter<'_>, conflict: &Option<ConflictAction>) -> fmt::Result {
    match conflict {
        Some(action) => write!(f, " {}", action),
        None => Ok(()),
    }
}

impl fmt::Display for ColumnConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnConstraint::PrimaryKey {
                order,
                conflict,
                autoincrement,
            } => {
                f.write_str("PRIMARY KEY")?;
                if let Some(order) = order {
                    write!(f, " {}", order)?;
                }
                write_conflict(f, conflict)?;
                if *autoincrement {
                    f.write_str(" AUTOINCREMENT")?;
                }
                Ok(())
            }
            ColumnConstraint::NotNull { conflict } => {
                f.write_str("NOT NULL")?;
                write_conflict(f, conflict)
            }
            ColumnConstraint::Unique { conflict } => {
                f.write_str("UNIQUE")?;
                write_conflict(f, conflict)
            }
            ColumnConstraint::Check(expression) => write!(f, "CHECK({})", expression),
            ColumnConstraint::Default(value) => match value {
                LiteralValue::Integer(_) | LiteralValue::Float(_)
                    if value.to_string().starts_with('-') =>
                {
                    write!(f, "DEFAULT({})", value)
                }
                _ => write!(f, "DEFAULT {}", value),
            },
            ColumnConstraint::Collate(collation) => {
                write!(f, "COLLATE {}", quote_identifier(collation))
            }
            ColumnConstraint::NotIndexed => f.write_str("UNINDEXED"),
        }
    }
}

/// Definition of one column: name, storage type and ordered constraints.
///
/// Its `Display` output is the full textual definition used inside
/// `CREATE TABLE` and non-FTS5 virtual table arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    name: String,
    column_type: ColumnType,
    #[serde(default)]
    constraints: Vec<ColumnConstraint>,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            constraints: Vec::new(),
        }
    }

    /// Append a constraint, keeping insertion order.
    pub fn add_constraint(&mut self, constraint: ColumnConstraint) {
        self.constraints.push(constraint);
    }

    pub fn with_constraint(mut self, constraint: ColumnConstraint) -> Self {
        self.add_constraint(constraint);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn constraints(&self) -> &[ColumnConstraint] {
        &self.constraints
    }

    pub fn is_primary_key(&self) -> bool {
        self.constraints.iter().any(ColumnConstraint::is_primary_key)
    }

    pub fn is_not_indexed(&self) -> bool {
        self.constraints.iter().any(ColumnConstraint::is_not_indexed)
    }
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", quote_identifier(&self.name), self.column_type)?;
        for constraint in &self.constraints {
            write!(f, " {}", constraint)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_def_renders_constraints_in_order() {
        let def = ColumnDef::new("id", ColumnType::Integer)
            .with_constraint(ColumnConstraint::primary_key().order(Order::Asc).autoincrement())
            .with_constraint(ColumnConstraint::not_null());

        assert_eq!(def.to_string(), "id INTEGER PRIMARY KEY ASC AUTOINCREMENT NOT NULL");
        assert!(def.is_primary_key());
        assert!(!def.is_not_indexed());
    }

    #[test]
    fn test_conflict_clause_only_applies_to_conflict_constraints() {
        let unique = ColumnConstraint::unique().on_conflict(ConflictAction::Replace);
        assert_eq!(unique.to_string(), "UNIQUE ON CONFLICT REPLACE");

        let collate = ColumnConstraint::collate("NOCASE").on_conflict(ConflictAction::Ignore);
        assert_eq!(collate, ColumnConstraint::Collate("NOCASE".to_string()));
    }

    #[test]
    fn test_default_literals() {
        assert_eq!(ColumnConstraint::default_value("it's").to_string(), "DEFAULT 'it''s'");
        assert_eq!(ColumnConstraint::default_value(1.0).to_string(), "DEFAULT 1.0");
        assert_eq!(ColumnConstraint::default_value(-3).to_string(), "DEFAULT(-3)");
        assert_eq!(
            ColumnConstraint::Default(LiteralValue::Blob(vec![0x0a, 0xff])).to_string(),
            "DEFAULT X'0AFF'"
        );
        assert_eq!(
            ColumnConstraint::Default(LiteralValue::CurrentTimestamp).to_string(),
            "DEFAULT CURRENT_TIMESTAMP"
        );
    }

    #[test]
    fn test_non_finite_float_defaults() {
        assert_eq!(ColumnConstraint::default_value(f64::NAN).to_string(), "DEFAULT NULL");
        assert_eq!(ColumnConstraint::default_value(f64::INFINITY).to_string(), "DEFAULT 9e999");
        assert_eq!(
            ColumnConstraint::default_value(f64::NEG_INFINITY).to_string(),
            "DEFAULT(-9e999)"
        );
    }

    #[test]
    fn test_not_indexed_renders_unindexed() {
        let def = ColumnDef::new("body", ColumnType::Text).with_constraint(ColumnConstraint::not_indexed());
        assert!(def.is_not_indexed());
        assert_eq!(def.to_string(), "body TEXT UNINDEXED");
    }

    #[test]
    fn test_codable_types() {
        assert_eq!(bool::COLUMN_TYPE, ColumnType::Integer);
        assert_eq!(f32::COLUMN_TYPE, ColumnType::Float);
        assert_eq!(<Vec<u8>>::COLUMN_TYPE, ColumnType::Blob);
        assert_eq!(<Option<Option<i32>>>::COLUMN_TYPE, ColumnType::Integer);
    }
}
