//! Serializable form of a [`FieldCatalog`](crate::catalog::FieldCatalog).
//!
//! Deployments whose schema differs from the built-in one ship a JSON file in
//! this shape and point the service at it on startup.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDescription {
    /// Table every read starts from, e.g. `athletes`.
    pub root_table: String,
    #[serde(default = "default_primary_key")]
    pub primary_key: String,
    /// Columns selectable straight from the root row.
    pub direct_columns: Vec<String>,
    pub related_tables: Vec<TableDescription>,
    /// Related tables that may be requested by bare name.
    #[serde(default)]
    pub full_tables: Vec<String>,
    /// Projection used when the caller names no fields. Passed through verbatim.
    pub default_projection: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescription {
    pub name: String,
    pub columns: Vec<String>,
}

fn default_primary_key() -> String {
    "id".to_string()
}
