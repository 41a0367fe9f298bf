use thiserror::Error;

/// Raised when a requested field is not in the catalog.
///
/// Carries the offending token exactly as the caller sent it. This is always
/// the caller's fault.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid query: '{0}'")]
    InvalidReference(String),
}

impl QueryError {
    pub fn invalid(token: &str) -> Self {
        QueryError::InvalidReference(token.to_string())
    }

    pub fn token(&self) -> &str {
        match self {
            QueryError::InvalidReference(token) => token,
        }
    }
}
