use std::{fmt, time::Duration};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection details for a PostgREST endpoint.
#[derive(Clone)]
pub struct PostgrestConfig {
    /// REST root, e.g. `https://project.supabase.co/rest/v1`.
    pub base_url: String,
    pub api_key: String,
    /// User access token. Falls back to the API key when absent.
    pub access_token: Option<String>,
    pub timeout: Duration,
}

impl PostgrestConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            access_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.api_key)
    }
}

// Keys and tokens stay out of logs.
impl fmt::Debug for PostgrestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgrestConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}
