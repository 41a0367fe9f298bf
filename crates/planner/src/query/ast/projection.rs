//! Defines the AST for the column selection of a profile read.

use serde::Serialize;

pub use model::catalog::table::RelatedTable;

/// The validated result of a field request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// No fields were requested; the catalog's default projection, verbatim.
    Default(String),
    Fields(FieldSelection),
}

impl Projection {
    pub fn is_default(&self) -> bool {
        matches!(self, Projection::Default(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldSelection {
    /// Columns of the root row, in first-seen order.
    pub direct_columns: Vec<String>,
    /// Embedded relations, in first-seen order. A table appears at most once.
    pub relations: Vec<RelationClause>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationClause {
    pub table: RelatedTable,
    pub columns: RelationColumns,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationColumns {
    /// `table (*)`
    All,
    Columns(Vec<String>),
}

impl FieldSelection {
    pub fn add_direct(&mut self, column: &str) {
        self.direct_columns.push(column.to_string());
    }

    /// Appends `column` to the clause for `table`, opening the clause if needed.
    /// A wildcarded table stays wildcarded.
    pub fn add_column(&mut self, table: RelatedTable, column: &str) {
        match self.relation_mut(table) {
            Some(clause) => {
                if let RelationColumns::Columns(columns) = &mut clause.columns {
                    columns.push(column.to_string());
                }
            }
            None => self.relations.push(RelationClause {
                table,
                columns: RelationColumns::Columns(vec![column.to_string()]),
            }),
        }
    }

    /// Marks `table` as fully selected, dropping any columns gathered for it.
    pub fn select_all(&mut self, table: RelatedTable) {
        match self.relation_mut(table) {
            Some(clause) => clause.columns = RelationColumns::All,
            None => self.relations.push(RelationClause {
                table,
                columns: RelationColumns::All,
            }),
        }
    }

    fn relation_mut(&mut self, table: RelatedTable) -> Option<&mut RelationClause> {
        self.relations.iter_mut().find(|clause| clause.table == table)
    }
}
