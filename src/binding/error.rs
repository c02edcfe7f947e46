//! Error types for table bindings

use thiserror::Error;

/// Configuration errors detected while sealing a binding or generating statements.
///
/// None of these are transient: they mean the record type and its binding
/// configuration disagree, and the schema must not be created from it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// The record type declares no coding keys
    #[error("Record type {record} declares no coding keys")]
    NoKeys { record: &'static str },

    /// The same key appears twice in the key enumeration
    #[error("Record type {record} lists key {key} more than once")]
    DuplicateKey { record: &'static str, key: String },

    /// Two keys share one raw column name
    #[error("Record type {record} uses column name '{name}' for more than one key")]
    DuplicateRawName { record: &'static str, name: String },

    /// The type oracle has no storage type for some keys
    #[error(
        "Column types of {record} cannot be decided for keys: {}",
        .keys.join(", ")
    )]
    UndecidableType {
        record: &'static str,
        keys: Vec<String>,
    },

    /// More than one column carries a primary key constraint
    #[error(
        "Only one primary key column is supported on {record}, found: {}. Use a multi-column primary key table constraint instead",
        .keys.join(", ")
    )]
    MultiplePrimaryKeys {
        record: &'static str,
        keys: Vec<String>,
    },

    /// A virtual table statement was requested without a module
    #[error("Virtual table module is not configured for {record}")]
    MissingVirtualTable { record: &'static str },

    /// A second virtual table module was configured
    #[error("Virtual table module is already configured as {existing}")]
    VirtualTableAlreadyConfigured { existing: String },

    /// The key is not part of the record type's key enumeration
    #[error("Key {key} is not bound to {record}")]
    UnboundKey { record: &'static str, key: String },

    /// A multi-column constraint or index was configured without columns
    #[error("The {target} on {record} names no columns")]
    EmptyColumnList { record: &'static str, target: String },

    /// Binding options could not be parsed
    #[error("Invalid binding options: {0}")]
    InvalidOptions(String),
}

/// Result alias for binding operations
pub type BindingResult<T> = Result<T, BindingError>;

impl From<serde_json::Error> for BindingError {
    fn from(e: serde_json::Error) -> Self {
        BindingError::InvalidOptions(e.to_string())
    }
}

impl From<serde_yaml::Error> for BindingError {
    fn from(e: serde_yaml::Error) -> Self {
        BindingError::InvalidOptions(e.to_string())
    }
}
