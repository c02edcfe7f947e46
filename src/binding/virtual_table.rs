//! Virtual table modules and their configuration

use serde::{Deserialize, Serialize};
use std::fmt;

/// Engine behind a virtual table.
///
/// Serialized as its module name. Deserialization goes through
/// [`VirtualTableModule::from_name`], so `"FTS5"` and `"fts5"` are the same module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VirtualTableModule {
    Fts3,
    Fts4,
    Fts5,
    RTree,
    Custom(String),
}

impl VirtualTableModule {
    /// Parse a module name. SQLite module names are case-insensitive, so the
    /// built-in modules are recognised regardless of case.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "fts3" => VirtualTableModule::Fts3,
            "fts4" => VirtualTableModule::Fts4,
            "fts5" => VirtualTableModule::Fts5,
            "rtree" => VirtualTableModule::RTree,
            _ => VirtualTableModule::Custom(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            VirtualTableModule::Fts3 => "fts3",
            VirtualTableModule::Fts4 => "fts4",
            VirtualTableModule::Fts5 => "fts5",
            VirtualTableModule::RTree => "rtree",
            VirtualTableModule::Custom(name) => name,
        }
    }

    pub fn is_fts5(&self) -> bool {
        self.name().eq_ignore_ascii_case("fts5")
    }

    /// FTS5 declares columns by bare name (optionally `UNINDEXED`); every other
    /// module takes full column definitions.
    pub fn uses_bare_column_names(&self) -> bool {
        self.is_fts5()
    }
}

impl From<String> for VirtualTableModule {
    fn from(name: String) -> Self {
        VirtualTableModule::from_name(&name)
    }
}

impl From<VirtualTableModule> for String {
    fn from(module: VirtualTableModule) -> Self {
        module.name().to_string()
    }
}

impl fmt::Display for VirtualTableModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Virtual table module plus the free-form arguments placed before the columns.
///
/// # Example
///
/// ```rust
/// use table_binding_sdk::binding::VirtualTableConfig;
///
/// let config = VirtualTableConfig::fts5()
///     .tokenizer("porter", ["unicode61"])
///     .content_table("messages");
///
/// assert_eq!(
///     config.parameters(),
///     ["tokenize = 'porter unicode61'", "content='messages'"]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualTableConfig {
    module: VirtualTableModule,
    #[serde(default)]
    parameters: Vec<String>,
}

impl VirtualTableConfig {
    /// Built-in modules spelled as [`VirtualTableModule::Custom`] are normalized.
    pub fn new(module: VirtualTableModule) -> Self {
        Self {
            module: VirtualTableModule::from_name(module.name()),
            parameters: Vec::new(),
        }
    }

    pub fn fts3() -> Self {
        Self::new(VirtualTableModule::Fts3)
    }

    pub fn fts4() -> Self {
        Self::new(VirtualTableModule::Fts4)
    }

    pub fn fts5() -> Self {
        Self::new(VirtualTableModule::Fts5)
    }

    pub fn rtree() -> Self {
        Self::new(VirtualTableModule::RTree)
    }

    /// Append a raw module argument.
    pub fn parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameters.push(parameter.into());
        self
    }

    /// Select a tokenizer, spelled the way the module expects it.
    pub fn tokenizer<I, S>(self, name: &str, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut spec = name.to_string();
        for argument in arguments {
            spec.push(' ');
            spec.push_str(argument.as_ref());
        }
        let parameter = if self.module.is_fts5() {
            format!("tokenize = '{}'", spec.replace('\'', "''"))
        } else {
            format!("tokenize={}", spec)
        };
        self.parameter(parameter)
    }

    /// Index the rows of `table` instead of storing content (external content).
    pub fn content_table(self, table: &str) -> Self {
        let parameter = format!("content='{}'", table.replace('\'', "''"));
        self.parameter(parameter)
    }

    pub fn module(&self) -> &VirtualTableModule {
        &self.module
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_names() {
        assert_eq!(VirtualTableModule::from_name("FTS5"), VirtualTableModule::Fts5);
        assert_eq!(VirtualTableModule::from_name("rtree").name(), "rtree");
        assert_eq!(
            VirtualTableModule::from_name("spellfix1"),
            VirtualTableModule::Custom("spellfix1".to_string())
        );
        assert!(VirtualTableModule::Fts5.uses_bare_column_names());
        assert!(!VirtualTableModule::Fts4.uses_bare_column_names());
    }

    #[test]
    fn test_custom_spelling_of_builtin_module_is_normalized() {
        let module = VirtualTableModule::Custom("FTS5".to_string());
        assert!(module.uses_bare_column_names());

        let config = VirtualTableConfig::new(module).tokenizer("trigram", Vec::<String>::new());
        assert_eq!(config.module(), &VirtualTableModule::Fts5);
        assert_eq!(config.parameters(), ["tokenize = 'trigram'"]);
    }

    #[test]
    fn test_module_deserializes_case_insensitively() {
        let config: VirtualTableConfig = serde_json::from_str(r#"{"module":"FTS5"}"#).unwrap();
        assert_eq!(config.module(), &VirtualTableModule::Fts5);

        let config: VirtualTableConfig = serde_json::from_str(r#"{"module":"spellfix1"}"#).unwrap();
        assert_eq!(
            config.module(),
            &VirtualTableModule::Custom("spellfix1".to_string())
        );
        assert_eq!(
            serde_json::to_value(&config).unwrap()["module"],
            "spellfix1"
        );
    }

    #[test]
    fn test_fts4_tokenizer_is_unquoted() {
        let config = VirtualTableConfig::fts4().tokenizer("unicode61", ["remove_diacritics=2"]);
        assert_eq!(config.parameters(), ["tokenize=unicode61 remove_diacritics=2"]);
    }

    #[test]
    fn test_tokenizer_without_arguments() {
        let config = VirtualTableConfig::fts5().tokenizer("trigram", Vec::<String>::new());
        assert_eq!(config.parameters(), ["tokenize = 'trigram'"]);
    }
}
