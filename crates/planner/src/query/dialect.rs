//! Defines the `Dialect` trait for backend-specific projection syntax.

use crate::query::ast::projection::RelationColumns;
use std::{fmt, str::FromStr};

pub trait Dialect: Send + Sync {
    /// Renders one embedded relation clause.
    ///
    /// - `Postgrest` renders `users (name, username)`
    /// - `PostgrestInner` renders `users!inner(name, username)`
    fn render_relation(&self, table: &str, columns: &RelationColumns) -> String;

    /// Returns the name of the dialect.
    fn name(&self) -> String;
}

/// Plain PostgREST resource embedding. Root rows without a related row are
/// kept, with the relation rendered as `null`.
#[derive(Debug, Clone)]
pub struct Postgrest;

impl Dialect for Postgrest {
    fn render_relation(&self, table: &str, columns: &RelationColumns) -> String {
        format!("{table} ({})", column_list(columns))
    }

    fn name(&self) -> String {
        "PostgREST".into()
    }
}

/// PostgREST embedding with an inner-join hint. Root rows without a related
/// row are filtered out.
#[derive(Debug, Clone)]
pub struct PostgrestInner;

impl Dialect for PostgrestInner {
    fn render_relation(&self, table: &str, columns: &RelationColumns) -> String {
        format!("{table}!inner({})", column_list(columns))
    }

    fn name(&self) -> String {
        "PostgREST (inner)".into()
    }
}

fn column_list(columns: &RelationColumns) -> String {
    match columns {
        RelationColumns::All => "*".to_string(),
        RelationColumns::Columns(columns) => columns.join(", "),
    }
}

/// Configuration-facing selector for a [`Dialect`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialectKind {
    #[default]
    Postgrest,
    PostgrestInner,
}

impl DialectKind {
    pub fn dialect(&self) -> &'static dyn Dialect {
        match self {
            DialectKind::Postgrest => &Postgrest,
            DialectKind::PostgrestInner => &PostgrestInner,
        }
    }
}

impl FromStr for DialectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgrest" | "default" => Ok(DialectKind::Postgrest),
            "postgrest-inner" | "inner" => Ok(DialectKind::PostgrestInner),
            other => Err(format!("Unknown dialect: {other}")),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialectKind::Postgrest => write!(f, "postgrest"),
            DialectKind::PostgrestInner => write!(f, "postgrest-inner"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_syntax() {
        let columns = RelationColumns::Columns(vec!["name".into(), "username".into()]);

        assert_eq!(
            Postgrest.render_relation("users", &columns),
            "users (name, username)"
        );
        assert_eq!(
            PostgrestInner.render_relation("users", &columns),
            "users!inner(name, username)"
        );
        assert_eq!(
            Postgrest.render_relation("division", &RelationColumns::All),
            "division (*)"
        );
        assert_eq!(
            PostgrestInner.render_relation("division", &RelationColumns::All),
            "division!inner(*)"
        );
    }

    #[test]
    fn test_dialect_kind_parses_config_values() {
        assert_eq!("postgrest".parse::<DialectKind>(), Ok(DialectKind::Postgrest));
        assert_eq!(
            "INNER".parse::<DialectKind>(),
            Ok(DialectKind::PostgrestInner)
        );
        assert!("mysql".parse::<DialectKind>().is_err());

        let kind = DialectKind::PostgrestInner;
        assert_eq!(kind.to_string().parse::<DialectKind>(), Ok(kind));
        assert_eq!(kind.dialect().name(), "PostgREST (inner)");
    }
}
