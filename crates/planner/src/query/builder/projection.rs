//! Turns a caller's field list into a validated [`Projection`].
//!
//! Fields come in three shapes:
//! - direct: `federation_id`, a column on the root row
//! - nested: `users.name`, one column of an embedded relation
//! - full table: `division`, every column of an embedded relation
//!
//! The list is first cleaned (exact duplicates removed, nested fields dropped
//! when their whole table is also requested) and then validated entry by entry
//! against the [`FieldCatalog`]. The first unknown field aborts the build.

use crate::query::{
    ast::{
        field::FieldRef,
        projection::{FieldSelection, Projection, RelatedTable},
    },
    error::QueryError,
};
use model::catalog::FieldCatalog;
use std::{collections::HashSet, str::FromStr};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct SelectiveQueryBuilder<'a> {
    catalog: &'a FieldCatalog,
}

impl<'a> SelectiveQueryBuilder<'a> {
    pub fn new(catalog: &'a FieldCatalog) -> Self {
        Self { catalog }
    }

    /// Builds the projection for `fields`.
    ///
    /// `None` and an empty list both yield the catalog's default projection.
    pub fn build<S: AsRef<str>>(&self, fields: Option<&[S]>) -> Result<Projection, QueryError> {
        let Some(cleaned) = self.clean_fields(fields) else {
            debug!("No fields requested, using default projection");
            return Ok(Projection::Default(
                self.catalog.default_projection().to_string(),
            ));
        };

        let selection = self.compose(&cleaned)?;
        debug!(
            "Resolved {} field(s) into {} direct column(s) and {} relation(s)",
            cleaned.len(),
            selection.direct_columns.len(),
            selection.relations.len()
        );
        Ok(Projection::Fields(selection))
    }

    /// Deduplicates `fields` and resolves full-table/nested conflicts.
    ///
    /// Returns `None` when nothing was requested. Order of first occurrence is
    /// kept. `[federation, federation.id]` becomes `[federation]`.
    pub fn clean_fields<'f, S: AsRef<str>>(&self, fields: Option<&'f [S]>) -> Option<Vec<&'f str>> {
        let fields = fields.filter(|fields| !fields.is_empty())?;

        let mut seen = HashSet::new();
        let unique = fields
            .iter()
            .map(|field| field.as_ref())
            .filter(|field| seen.insert(*field))
            .collect::<Vec<_>>();

        let full_tables = unique
            .iter()
            .copied()
            .filter(|field| !field.contains('.') && self.catalog.is_full_table_name(field))
            .collect::<HashSet<_>>();

        if full_tables.is_empty() {
            return Some(unique);
        }

        Some(
            unique
                .into_iter()
                .filter(|field| match FieldRef::parse(field) {
                    FieldRef::Nested { table, .. } => !full_tables.contains(table),
                    FieldRef::Bare(_) => true,
                })
                .collect(),
        )
    }

    fn compose(&self, fields: &[&str]) -> Result<FieldSelection, QueryError> {
        let mut selection = FieldSelection::default();

        for &field in fields {
            match FieldRef::parse(field) {
                FieldRef::Nested { table, column } => {
                    let related = match RelatedTable::from_str(table) {
                        Ok(related) if self.catalog.is_nested_column(table, column) => related,
                        _ => return Err(QueryError::invalid(field)),
                    };
                    selection.add_column(related, column);
                }
                FieldRef::Bare(name) => {
                    if let Some(table) = self.catalog.full_table(name) {
                        selection.select_all(table);
                    } else if self.catalog.is_direct_column(name) {
                        selection.add_direct(name);
                    } else {
                        return Err(QueryError::invalid(name));
                    }
                }
            }
        }

        Ok(selection)
    }
}
