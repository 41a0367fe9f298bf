use thiserror::Error;

/// Errors raised while turning a schema description into a [`FieldCatalog`].
///
/// [`FieldCatalog`]: crate::catalog::FieldCatalog
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A table name in the description is not one of the known related tables.
    #[error("Unknown related table: {0}")]
    UnknownTable(String),

    /// A full-table name has no column list in `related_tables`.
    #[error("Full-table entry '{0}' is missing from related tables")]
    FullTableNotRelated(String),

    /// The same table was described twice.
    #[error("Related table '{0}' is described more than once")]
    DuplicateTable(String),

    /// A required attribute was left empty.
    #[error("Missing required property: {0}")]
    MissingProperty(&'static str),

    #[error("Failed to parse catalog description: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Parse(err.to_string())
    }
}
