//! Options applied to every statement a binding generates

use serde::{Deserialize, Serialize};

use super::error::BindingResult;

/// Statement generation options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BindingOptions {
    /// Emit `IF NOT EXISTS` on every CREATE statement
    pub if_not_exists: bool,

    /// Schema the table, indexes and virtual table are created in
    /// (`main`, `temp` or an attached database)
    pub schema_name: Option<String>,

    /// Create ordinary tables `WITHOUT ROWID`
    pub without_rowid: bool,
}

impl Default for BindingOptions {
    fn default() -> Self {
        Self {
            if_not_exists: true,
            schema_name: None,
            without_rowid: false,
        }
    }
}

impl BindingOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom options
    pub fn builder() -> BindingOptionsBuilder {
        BindingOptionsBuilder::default()
    }

    /// Parse options from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> BindingResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse options from YAML; missing fields take their defaults
    pub fn from_yaml_str(yaml: &str) -> BindingResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Builder for BindingOptions
#[derive(Debug, Default)]
pub struct BindingOptionsBuilder {
    options: BindingOptions,
}

impl BindingOptionsBuilder {
    /// Enable or disable `IF NOT EXISTS`
    pub fn if_not_exists(mut self, enabled: bool) -> Self {
        self.options.if_not_exists = enabled;
        self
    }

    /// Set the schema qualifier
    pub fn schema_name(mut self, schema: impl Into<String>) -> Self {
        self.options.schema_name = Some(schema.into());
        self
    }

    /// Enable or disable `WITHOUT ROWID`
    pub fn without_rowid(mut self, enabled: bool) -> Self {
        self.options.without_rowid = enabled;
        self
    }

    /// Build the options
    pub fn build(self) -> BindingOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::BindingError;

    #[test]
    fn test_default_options() {
        let options = BindingOptions::default();
        assert!(options.if_not_exists);
        assert_eq!(options.schema_name, None);
        assert!(!options.without_rowid);
    }

    #[test]
    fn test_builder() {
        let options = BindingOptions::builder()
            .if_not_exists(false)
            .schema_name("temp")
            .without_rowid(true)
            .build();

        assert!(!options.if_not_exists);
        assert_eq!(options.schema_name.as_deref(), Some("temp"));
        assert!(options.without_rowid);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let options = BindingOptions::from_yaml_str("schemaName: archive\n").unwrap();
        assert!(options.if_not_exists);
        assert_eq!(options.schema_name.as_deref(), Some("archive"));
    }

    #[test]
    fn test_json_options() {
        let options = BindingOptions::from_json_str(r#"{"ifNotExists": false}"#).unwrap();
        assert!(!options.if_not_exists);

        let err = BindingOptions::from_json_str("{\"ifNotExists\": \"yes\"}").unwrap_err();
        assert!(matches!(err, BindingError::InvalidOptions(_)));
    }
}
