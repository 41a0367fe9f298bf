pub mod error;

use connectors::postgrest::config::{DEFAULT_TIMEOUT, PostgrestConfig};
use error::SettingsError;
use model::catalog::FieldCatalog;
use planner::query::dialect::DialectKind;
use std::{collections::HashMap, fmt, path::PathBuf, time::Duration};
use tracing::info;

pub const POSTGREST_URL: &str = "POSTGREST_URL";
pub const POSTGREST_API_KEY: &str = "POSTGREST_API_KEY";
pub const POSTGREST_ACCESS_TOKEN: &str = "POSTGREST_ACCESS_TOKEN";
pub const POSTGREST_TIMEOUT_SECS: &str = "POSTGREST_TIMEOUT_SECS";
pub const PROFILE_CATALOG_PATH: &str = "PROFILE_CATALOG_PATH";
pub const PROFILE_DIALECT: &str = "PROFILE_DIALECT";

/// Runtime configuration, read from environment-style key/value pairs.
///
/// Backend credentials are optional here so that offline commands (rendering
/// a projection, printing the catalog) work without them; they are required
/// once a [`PostgrestConfig`] is requested.
#[derive(Clone)]
pub struct Settings {
    pub postgrest_url: Option<String>,
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub timeout: Duration,
    pub catalog_path: Option<PathBuf>,
    pub dialect: DialectKind,
}

impl Settings {
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, SettingsError> {
        let get = |key: &str| {
            vars.get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let timeout = match get(POSTGREST_TIMEOUT_SECS) {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| SettingsError::InvalidValue {
                    key: POSTGREST_TIMEOUT_SECS,
                    value: raw.clone(),
                })?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        let dialect = match get(PROFILE_DIALECT) {
            Some(raw) => raw
                .parse::<DialectKind>()
                .map_err(|_| SettingsError::InvalidValue {
                    key: PROFILE_DIALECT,
                    value: raw.clone(),
                })?,
            None => DialectKind::default(),
        };

        Ok(Self {
            postgrest_url: get(POSTGREST_URL),
            api_key: get(POSTGREST_API_KEY),
            access_token: get(POSTGREST_ACCESS_TOKEN),
            timeout,
            catalog_path: get(PROFILE_CATALOG_PATH).map(PathBuf::from),
            dialect,
        })
    }

    pub fn postgrest_config(&self) -> Result<PostgrestConfig, SettingsError> {
        let url = self
            .postgrest_url
            .as_deref()
            .ok_or(SettingsError::MissingVariable(POSTGREST_URL))?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SettingsError::MissingVariable(POSTGREST_API_KEY))?;

        let mut config = PostgrestConfig::new(url, api_key).with_timeout(self.timeout);
        if let Some(token) = &self.access_token {
            config = config.with_access_token(token);
        }
        Ok(config)
    }

    /// Loads the catalog named by `PROFILE_CATALOG_PATH`, or the built-in one.
    pub fn load_catalog(&self) -> Result<FieldCatalog, SettingsError> {
        let Some(path) = &self.catalog_path else {
            return Ok(FieldCatalog::athletes());
        };

        let source = std::fs::read_to_string(path).map_err(|source| SettingsError::CatalogRead {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = FieldCatalog::from_json(&source)?;
        info!("Loaded field catalog from {}", path.display());
        Ok(catalog)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("postgrest_url", &self.postgrest_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("timeout", &self.timeout)
            .field("catalog_path", &self.catalog_path)
            .field("dialect", &self.dialect)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_vars(&HashMap::new()).unwrap();

        assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
        assert_eq!(settings.dialect, DialectKind::Postgrest);
        assert!(settings.catalog_path.is_none());
        assert_eq!(
            settings.postgrest_config().unwrap_err().to_string(),
            "Missing environment variable: POSTGREST_URL"
        );
    }

    #[test]
    fn test_full_configuration() {
        let settings = Settings::from_vars(&vars(&[
            (POSTGREST_URL, "http://localhost:3000"),
            (POSTGREST_API_KEY, "anon"),
            (POSTGREST_ACCESS_TOKEN, "jwt"),
            (POSTGREST_TIMEOUT_SECS, "3"),
            (PROFILE_DIALECT, "postgrest-inner"),
        ]))
        .unwrap();

        let config = settings.postgrest_config().unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.bearer(), "jwt");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(settings.dialect, DialectKind::PostgrestInner);
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let settings = Settings::from_vars(&vars(&[
            (POSTGREST_URL, "http://localhost:3000"),
            (POSTGREST_API_KEY, "   "),
        ]))
        .unwrap();

        assert!(matches!(
            settings.postgrest_config(),
            Err(SettingsError::MissingVariable(POSTGREST_API_KEY))
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Settings::from_vars(&vars(&[(POSTGREST_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value 'soon' for POSTGREST_TIMEOUT_SECS"
        );

        let err = Settings::from_vars(&vars(&[(PROFILE_DIALECT, "mysql")])).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidValue {
                key: PROFILE_DIALECT,
                ..
            }
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let settings = Settings::from_vars(&vars(&[(POSTGREST_API_KEY, "anon-secret")])).unwrap();
        assert!(!format!("{settings:?}").contains("anon-secret"));
    }

    #[test]
    fn test_load_catalog_builtin_and_from_file() {
        let settings = Settings::from_vars(&HashMap::new()).unwrap();
        assert_eq!(settings.load_catalog().unwrap(), FieldCatalog::athletes());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "root_table": "athletes",
                "direct_columns": ["id"],
                "related_tables": [{{ "name": "users", "columns": ["username"] }}],
                "default_projection": "id"
            }}"#
        )
        .unwrap();

        let path = file.path().display().to_string();
        let settings = Settings::from_vars(&vars(&[(PROFILE_CATALOG_PATH, path.as_str())])).unwrap();
        let catalog = settings.load_catalog().unwrap();

        assert!(catalog.is_nested_column("users", "username"));
        assert!(!catalog.is_full_table_name("users"));
    }

    #[test]
    fn test_load_catalog_errors() {
        let settings =
            Settings::from_vars(&vars(&[(PROFILE_CATALOG_PATH, "/nonexistent/catalog.json")]))
                .unwrap();
        assert!(matches!(
            settings.load_catalog(),
            Err(SettingsError::CatalogRead { .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "root_table": "athletes",
                "direct_columns": ["id"],
                "related_tables": [],
                "full_tables": ["users"],
                "default_projection": "id"
            }}"#
        )
        .unwrap();

        let path = file.path().display().to_string();
        let settings = Settings::from_vars(&vars(&[(PROFILE_CATALOG_PATH, path.as_str())])).unwrap();
        assert!(matches!(
            settings.load_catalog(),
            Err(SettingsError::Catalog(_))
        ));
    }
}
