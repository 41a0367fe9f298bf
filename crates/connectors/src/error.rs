use thiserror::Error;

/// Errors raised by a [`ProfileSource`](crate::source::ProfileSource).
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The source could not be set up from its configuration.
    #[error("Invalid connector configuration: {0}")]
    InvalidConfig(String),

    /// Transport-level failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with an error payload.
    #[error("{context}: {code} - {message}")]
    Backend {
        status: u16,
        code: String,
        message: String,
        context: String,
    },
}

impl ConnectorError {
    /// True when the backend rejected the request itself (4xx), as opposed to
    /// failing to serve it.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ConnectorError::Backend { status, .. } if (400..500).contains(status))
    }
}
