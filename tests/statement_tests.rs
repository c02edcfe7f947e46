//! Statement descriptor tests

use table_binding_sdk::binding::VirtualTableConfig;
use table_binding_sdk::statement::{
    ColumnConstraint, ColumnDef, ColumnType, ConflictAction, IndexedColumn, LiteralValue,
    StatementCreateIndex, StatementCreateTable, StatementCreateVirtualTable, TableConstraint,
};

mod rendering_tests {
    use super::*;

    #[test]
    fn test_identifiers_are_quoted_when_needed() {
        let statement = StatementCreateTable::create("order")
            .with_columns([
                ColumnDef::new("group", ColumnType::Text),
                ColumnDef::new("display name", ColumnType::Text)
                    .with_constraint(ColumnConstraint::unique().on_conflict(ConflictAction::Ignore)),
            ]);

        assert_eq!(
            statement.to_string(),
            "CREATE TABLE \"order\"(\"group\" TEXT, \"display name\" TEXT UNIQUE ON CONFLICT IGNORE)"
        );
    }

    #[test]
    fn test_column_check_and_defaults() {
        let column = ColumnDef::new("price", ColumnType::Float)
            .with_constraint(ColumnConstraint::not_null().on_conflict(ConflictAction::Fail))
            .with_constraint(ColumnConstraint::check("price >= 0"))
            .with_constraint(ColumnConstraint::Default(LiteralValue::Float(0.0)));

        assert_eq!(
            column.to_string(),
            "price REAL NOT NULL ON CONFLICT FAIL CHECK(price >= 0) DEFAULT 0.0"
        );
    }

    #[test]
    fn test_virtual_table_without_arguments() {
        let statement = StatementCreateVirtualTable::create("spatial")
            .if_not_exists()
            .schema("aux")
            .using("rtree");

        assert_eq!(
            statement.to_string(),
            "CREATE VIRTUAL TABLE IF NOT EXISTS aux.spatial USING rtree"
        );
    }

    #[test]
    fn test_index_with_collation() {
        let statement = StatementCreateIndex::create("contacts_name_index")
            .on("contacts")
            .indexed_by([IndexedColumn::new("name").collate("NOCASE")]);

        assert_eq!(
            statement.to_string(),
            "CREATE INDEX contacts_name_index ON contacts(name COLLATE NOCASE)"
        );
    }
}

mod serde_tests {
    use super::*;

    #[test]
    fn test_create_table_serializes_as_structured_data() {
        let statement = StatementCreateTable::create("notes")
            .if_not_exists()
            .with_columns([ColumnDef::new("id", ColumnType::Integer)
                .with_constraint(ColumnConstraint::primary_key())])
            .constraints([TableConstraint::check("id > 0").named("positive_id")]);

        let json = serde_json::to_value(&statement).unwrap();
        assert_eq!(json["table"], "notes");
        assert_eq!(json["ifNotExists"], true);
        assert_eq!(json["columns"][0]["name"], "id");
        assert_eq!(json["columns"][0]["columnType"], "integer");
        assert_eq!(json["constraints"][0]["name"], "positive_id");
        assert!(json.get("schema").is_none());
    }

    #[test]
    fn test_virtual_table_config_from_yaml() {
        let yaml = r#"
module: fts5
parameters:
  - "tokenize = 'trigram'"
"#;
        let config: VirtualTableConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config, VirtualTableConfig::fts5().tokenizer("trigram", Vec::<&str>::new()));
    }
}
