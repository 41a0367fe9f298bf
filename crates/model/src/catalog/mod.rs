//! Whitelist of the fields a caller may request on a profile read.

use description::{CatalogDescription, TableDescription};
use error::CatalogError;
use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use table::RelatedTable;

pub mod description;
pub mod error;
pub mod table;

/// Projection returned when a profile read names no fields.
pub const ATHLETES_DEFAULT_PROJECTION: &str = "id, users (name, username), federation (name), division (name), weight_classes (name)";

/// Static description of what may be selected from the root entity and the
/// tables embedded into it.
///
/// Built once at startup and only read afterwards, so a single instance can be
/// shared across every request behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCatalog {
    root_table: String,
    primary_key: String,
    direct_columns: HashSet<String>,
    related_tables: HashMap<RelatedTable, HashSet<String>>,
    full_tables: HashSet<RelatedTable>,
    default_projection: String,
}

impl FieldCatalog {
    /// The built-in catalog for `athletes` reads.
    ///
    /// # Panics
    ///
    /// Panics if the built-in tables are inconsistent, which can only be
    /// caused by editing this function.
    pub fn athletes() -> Self {
        let related = [
            (
                RelatedTable::Users,
                &["id", "name", "first_name", "last_name", "username", "gender"][..],
            ),
            (RelatedTable::Federation, &["id", "name", "abbreviation"][..]),
            (RelatedTable::Division, &["id", "name", "federation_id"][..]),
            (
                RelatedTable::WeightClasses,
                &["id", "name", "gender", "federation_id"][..],
            ),
        ];

        let catalog = Self {
            root_table: "athletes".to_string(),
            primary_key: "id".to_string(),
            direct_columns: to_set(&["id", "federation_id", "division_id", "weight_class_id"]),
            related_tables: related
                .into_iter()
                .map(|(table, columns)| (table, to_set(columns)))
                .collect(),
            full_tables: HashSet::from([
                RelatedTable::Federation,
                RelatedTable::Division,
                RelatedTable::WeightClasses,
            ]),
            default_projection: ATHLETES_DEFAULT_PROJECTION.to_string(),
        };

        assert!(
            catalog
                .full_tables
                .iter()
                .all(|table| catalog.related_tables.contains_key(table)),
            "every full-table name must have a related table entry"
        );
        catalog
    }

    /// Validates a description loaded at startup and builds the catalog from it.
    pub fn from_description(desc: CatalogDescription) -> Result<Self, CatalogError> {
        if desc.root_table.is_empty() {
            return Err(CatalogError::MissingProperty("root_table"));
        }
        if desc.primary_key.is_empty() {
            return Err(CatalogError::MissingProperty("primary_key"));
        }
        if desc.default_projection.trim().is_empty() {
            return Err(CatalogError::MissingProperty("default_projection"));
        }

        let mut related_tables = HashMap::new();
        for TableDescription { name, columns } in desc.related_tables {
            let table = parse_table(&name)?;
            let columns = columns.into_iter().collect::<HashSet<_>>();
            if related_tables.insert(table, columns).is_some() {
                return Err(CatalogError::DuplicateTable(name));
            }
        }

        let mut full_tables = HashSet::new();
        for name in desc.full_tables {
            let table = parse_table(&name)?;
            if !related_tables.contains_key(&table) {
                return Err(CatalogError::FullTableNotRelated(name));
            }
            full_tables.insert(table);
        }

        Ok(Self {
            root_table: desc.root_table,
            primary_key: desc.primary_key,
            direct_columns: desc.direct_columns.into_iter().collect(),
            related_tables,
            full_tables,
            default_projection: desc.default_projection,
        })
    }

    pub fn from_json(source: &str) -> Result<Self, CatalogError> {
        let desc: CatalogDescription = serde_json::from_str(source)?;
        Self::from_description(desc)
    }

    /// Produces a description that round-trips through [`Self::from_description`].
    /// Tables and columns are sorted so the output is stable.
    pub fn describe(&self) -> CatalogDescription {
        let related_tables = RelatedTable::ALL
            .into_iter()
            .filter_map(|table| {
                self.related_tables.get(&table).map(|columns| TableDescription {
                    name: table.as_str().to_string(),
                    columns: sorted(columns.iter()),
                })
            })
            .collect();

        let full_tables = RelatedTable::ALL
            .into_iter()
            .filter(|table| self.full_tables.contains(table))
            .map(|table| table.as_str().to_string())
            .collect();

        CatalogDescription {
            root_table: self.root_table.clone(),
            primary_key: self.primary_key.clone(),
            direct_columns: sorted(self.direct_columns.iter()),
            related_tables,
            full_tables,
            default_projection: self.default_projection.clone(),
        }
    }

    pub fn root_table(&self) -> &str {
        &self.root_table
    }

    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    pub fn default_projection(&self) -> &str {
        &self.default_projection
    }

    pub fn is_direct_column(&self, name: &str) -> bool {
        self.direct_columns.contains(name)
    }

    /// True when `name` may be requested bare to embed every column of that table.
    pub fn is_full_table_name(&self, name: &str) -> bool {
        self.full_table(name).is_some()
    }

    pub fn full_table(&self, name: &str) -> Option<RelatedTable> {
        RelatedTable::from_str(name)
            .ok()
            .filter(|table| self.full_tables.contains(table))
    }

    /// True when `column` is selectable on the related table named `table`.
    /// Unknown tables are never valid.
    pub fn is_nested_column(&self, table: &str, column: &str) -> bool {
        RelatedTable::from_str(table)
            .map(|table| self.has_column(table, column))
            .unwrap_or(false)
    }

    pub fn has_column(&self, table: RelatedTable, column: &str) -> bool {
        self.related_tables
            .get(&table)
            .is_some_and(|columns| columns.contains(column))
    }
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::athletes()
    }
}

fn parse_table(name: &str) -> Result<RelatedTable, CatalogError> {
    RelatedTable::from_str(name).map_err(|_| CatalogError::UnknownTable(name.to_string()))
}

fn to_set(columns: &[&str]) -> HashSet<String> {
    columns.iter().map(|c| c.to_string()).collect()
}

fn sorted<'a>(columns: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut out = columns.cloned().collect::<Vec<_>>();
    out.sort();
    out
}
