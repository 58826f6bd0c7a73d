use std::sync::OnceLock;

use regex::Regex;

/// Kind of integrity constraint reported by PostgreSQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    NotNull,
    Check,
}

/// Structured view of a constraint violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub kind: ConstraintKind,
    /// Table the constraint belongs to (`member`, `team`)
    pub entity: String,
    /// Column the constraint guards (`team_id`, `age`)
    pub field: String,
    /// Offending value when the message carries a `Key (..)=(..)` detail
    pub value: Option<String>,
}

/// Extracts entity, column and value from PostgreSQL constraint messages.
///
/// Constraint names follow the PostgreSQL defaults used by the migrations:
/// `member_team_id_fkey`, `team_name_key`, `member_age_check`.
pub struct ConstraintParser;

struct Patterns {
    key_value: Regex,
    column: Regex,
    table: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

const SUFFIXES: [&str; 5] = ["_fkey", "_pkey", "_key", "_check", "_idx"];

impl ConstraintParser {
    fn patterns() -> &'static Patterns {
        PATTERNS.get_or_init(|| Patterns {
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("static regex"),
            column: Regex::new(r#"column "([^"]+)""#).expect("static regex"),
            table: Regex::new(r#"(?:table|relation) "([^"]+)""#).expect("static regex"),
        })
    }

    /// Parses a violation of the given kind.
    ///
    /// The constraint name is preferred; the message text is the fallback.
    /// Returns `None` when neither yields an entity and field.
    pub fn parse(
        kind: ConstraintKind,
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<ConstraintViolation> {
        let key_value = Self::extract_key_value(message);

        let (entity, field) = match constraint_name.and_then(Self::split_constraint_name) {
            Some(parts) => parts,
            None => {
                let field = Self::extract_column(message)
                    .or_else(|| key_value.as_ref().map(|(field, _)| field.clone()))?;
                let entity =
                    Self::extract_table(message).unwrap_or_else(|| "resource".to_string());
                (entity, field)
            }
        };

        Some(ConstraintViolation {
            kind,
            entity,
            field,
            value: key_value.map(|(_, value)| value),
        })
    }

    /// Splits `<table>_<column>_<suffix>` into table and column.
    ///
    /// `member_team_id_fkey` -> (`member`, `team_id`).
    pub fn split_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let stem = SUFFIXES
            .iter()
            .find_map(|suffix| constraint_name.strip_suffix(suffix))?;
        let (table, column) = stem.split_once('_')?;
        if table.is_empty() || column.is_empty() {
            return None;
        }
        Some((table.to_string(), column.to_string()))
    }

    /// `column "age"` -> `age`
    pub fn extract_column(message: &str) -> Option<String> {
        Self::patterns()
            .column
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// `table "member"` or `relation "member"` -> `member`
    pub fn extract_table(message: &str) -> Option<String> {
        Self::patterns()
            .table
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// `Key (team_id)=(999)` -> (`team_id`, `999`)
    pub fn extract_key_value(message: &str) -> Option<(String, String)> {
        Self::patterns().key_value.captures(message).and_then(|caps| {
            let field = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().to_string();
            Some((field, value))
        })
    }
}
