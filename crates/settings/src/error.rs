use model::catalog::error::CatalogError;
use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A variable required by the requested operation is not set.
    #[error("Missing environment variable: {0}")]
    MissingVariable(&'static str),

    /// A variable is set but cannot be interpreted.
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Failed to read catalog file {path}: {source}")]
    CatalogRead {
        path: String,
        source: std::io::Error,
    },

    /// The catalog description is inconsistent.
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}
