use connectors::error::ConnectorError;
use planner::query::error::QueryError;
use runtime::error::ServiceError;
use settings::error::SettingsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Invalid dialect provided: {0}")]
    InvalidDialect(String),

    #[error("{0}")]
    Query(#[from] QueryError),

    /// Failed to set up the backend connection.
    #[error("Connector error: {0}")]
    Connector(#[from] ConnectorError),

    #[error("Profile request failed ({status}): {0}", status = .0.status_code())]
    Service(#[from] ServiceError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::identifiers::AthleteId;

    #[test]
    fn test_service_errors_show_status() {
        let err = CliError::from(ServiceError::NotFound(AthleteId::from("a1")));
        assert_eq!(
            err.to_string(),
            "Profile request failed (404): Athlete profile not found: a1"
        );

        let err = CliError::from(ServiceError::EmptyUpdate);
        assert_eq!(
            err.to_string(),
            "Profile request failed (400): No profile fields to update"
        );
    }
}
