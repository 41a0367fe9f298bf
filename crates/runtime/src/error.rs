use connectors::error::ConnectorError;
use model::core::identifiers::AthleteId;
use planner::query::error::QueryError;
use thiserror::Error;

/// Top-level errors for profile reads and writes.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller asked for a field outside the catalog.
    #[error(transparent)]
    InvalidQuery(#[from] QueryError),

    /// The key matched no row.
    #[error("Athlete profile not found: {0}")]
    NotFound(AthleteId),

    /// A division or weight class was given without the federation it must
    /// belong to.
    #[error("Federation is required to validate {0}")]
    FederationRequired(&'static str),

    /// The referenced division or weight class is not part of the federation.
    #[error("{0} not found")]
    NotInFederation(&'static str),

    #[error("No profile fields to update")]
    EmptyUpdate,

    #[error("{action}: {source}")]
    Connector {
        action: &'static str,
        #[source]
        source: ConnectorError,
    },
}

impl ServiceError {
    /// Wraps a connector failure with what the service was doing.
    pub fn connector(action: &'static str) -> impl FnOnce(ConnectorError) -> ServiceError {
        move |source| ServiceError::Connector { action, source }
    }

    /// HTTP-style status for surfacing the error to a client.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::InvalidQuery(_)
            | ServiceError::FederationRequired(_)
            | ServiceError::NotInFederation(_)
            | ServiceError::EmptyUpdate => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::Connector { source, .. } if source.is_client_error() => 400,
            ServiceError::Connector { .. } => 502,
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}
