//! Identifier quoting for rendered statements.
//!
//! Plain identifiers are emitted as-is so generated SQL stays readable. Anything
//! else (spaces, punctuation, leading digits, keywords) is wrapped in double
//! quotes with embedded quotes doubled, following SQL quoting rules.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static PLAIN_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// SQLite keywords. None of them appear unquoted as a table, index or column name.
const RESERVED_WORDS: &[&str] = &[
    "ABORT", "ACTION", "ADD", "AFTER", "ALL", "ALTER", "ALWAYS", "ANALYZE", "AND", "AS", "ASC",
    "ATTACH", "AUTOINCREMENT", "BEFORE", "BEGIN", "BETWEEN", "BY", "CASCADE", "CASE", "CAST",
    "CHECK", "COLLATE", "COLUMN", "COMMIT", "CONFLICT", "CONSTRAINT", "CREATE", "CROSS", "CURRENT",
    "CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP", "DATABASE", "DEFAULT", "DEFERRABLE",
    "DEFERRED", "DELETE", "DESC", "DETACH", "DISTINCT", "DO", "DROP", "EACH", "ELSE", "END",
    "ESCAPE", "EXCEPT", "EXCLUDE", "EXCLUSIVE", "EXISTS", "EXPLAIN", "FAIL", "FILTER", "FIRST",
    "FOLLOWING", "FOR", "FOREIGN", "FROM", "FULL", "GENERATED", "GLOB", "GROUP", "GROUPS",
    "HAVING", "IF", "IGNORE", "IMMEDIATE", "IN", "INDEX", "INDEXED", "INITIALLY", "INNER",
    "INSERT", "INSTEAD", "INTERSECT", "INTO", "IS", "ISNULL", "JOIN", "KEY", "LAST", "LEFT",
    "LIKE", "LIMIT", "MATCH", "MATERIALIZED", "NATURAL", "NO", "NOT", "NOTHING", "NOTNULL", "NULL",
    "NULLS", "OF", "OFFSET", "ON", "OR", "ORDER", "OTHERS", "OUTER", "OVER", "PARTITION", "PLAN",
    "PRAGMA", "PRECEDING", "PRIMARY", "QUERY", "RAISE", "RANGE", "RECURSIVE", "REFERENCES",
    "REGEXP", "REINDEX", "RELEASE", "RENAME", "REPLACE", "RESTRICT", "RETURNING", "RIGHT",
    "ROLLBACK", "ROW", "ROWS", "SAVEPOINT", "SELECT", "SET", "TABLE", "TEMP", "TEMPORARY", "THEN",
    "TIES", "TO", "TRANSACTION", "TRIGGER", "UNBOUNDED", "UNION", "UNIQUE", "UPDATE", "USING",
    "VACUUM", "VALUES", "VIEW", "VIRTUAL", "WHEN", "WHERE", "WINDOW", "WITH", "WITHOUT",
];

/// Whether `name` is an SQL keyword that must be quoted.
pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS
        .iter()
        .any(|word| word.eq_ignore_ascii_case(name))
}

/// Quote `name` if it cannot be used as a bare identifier.
///
/// # Example
///
/// ```rust
/// use table_binding_sdk::statement::quote_identifier;
///
/// assert_eq!(quote_identifier("user_id"), "user_id");
/// assert_eq!(quote_identifier("order"), "\"order\"");
/// assert_eq!(quote_identifier("say \"hi\""), "\"say \"\"hi\"\"\"");
/// ```
pub fn quote_identifier(name: &str) -> Cow<'_, str> {
    if PLAIN_IDENTIFIER.is_match(name) && !is_reserved_word(name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("\"{}\"", name.replace('"', "\"\"")))
    }
}

/// Render `schema.name`, quoting each part as needed.
pub fn qualified_name(schema: Option<&str>, name: &str) -> String {
    match schema {
        Some(schema) => format!("{}.{}", quote_identifier(schema), quote_identifier(name)),
        None => quote_identifier(name).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_identifiers_are_untouched() {
        assert!(matches!(quote_identifier("title"), Cow::Borrowed("title")));
        assert_eq!(quote_identifier("_private2"), "_private2");
    }

    #[test]
    fn test_keywords_and_symbols_are_quoted() {
        assert_eq!(quote_identifier("Select"), "\"Select\"");
        assert_eq!(quote_identifier("first name"), "\"first name\"");
        assert_eq!(quote_identifier("1st"), "\"1st\"");
    }

    #[test]
    fn test_operator_and_trigger_keywords_are_reserved() {
        for word in ["glob", "LIKE", "match", "regexp", "raise", "abort", "window", "returning"] {
            assert!(is_reserved_word(word), "{} should be reserved", word);
        }
        assert_eq!(quote_identifier("match"), "\"match\"");
        assert!(!is_reserved_word("sender"));
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(qualified_name(Some("main"), "messages"), "main.messages");
        assert_eq!(qualified_name(None, "group"), "\"group\"");
    }
}
