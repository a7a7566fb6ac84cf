//! Client configuration with sensible defaults.
//!
//! [`GeocodingConfig`] controls where searches are sent, how long a request
//! may take, and how many requests may be in flight at once.

use crate::error::GeocodingError;
use crate::gate::DEFAULT_CAPACITY;
use tokio::sync::Semaphore;
use url::Url;

/// Public Open-Meteo geocoding search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Configuration for a [`GeocodingClient`](crate::GeocodingClient).
///
/// Use [`Default::default()`] and the `with_*` methods to override fields.
#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    /// Search endpoint. Query parameters already present are kept unless
    /// a search overrides them.
    pub base_url: String,
    /// Whole-request timeout in seconds for the default transport.
    pub timeout_seconds: u64,
    /// Maximum number of searches in flight at once. Further searches fail
    /// immediately with [`GeocodingError::ConcurrencyLimitExceeded`].
    pub max_concurrent_requests: usize,
    /// Custom User-Agent. If `None`, the crate name and version are sent.
    pub user_agent: Option<String>,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_seconds: 10,
            max_concurrent_requests: DEFAULT_CAPACITY,
            user_agent: None,
        }
    }
}

impl GeocodingConfig {
    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout in seconds.
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Set the number of concurrent request slots.
    pub fn with_max_concurrent_requests(mut self, capacity: usize) -> Self {
        self.max_concurrent_requests = capacity;
        self
    }

    /// Set a custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `base_url` parses as an absolute `http` or `https` URL
    /// - `timeout_seconds` must be greater than 0
    /// - `max_concurrent_requests` must be between 1 and [`Semaphore::MAX_PERMITS`]
    pub fn validate(&self) -> Result<(), GeocodingError> {
        self.parsed_base_url()?;
        if self.timeout_seconds == 0 {
            return Err(GeocodingError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_concurrent_requests == 0 {
            return Err(GeocodingError::Config(
                "max_concurrent_requests must be greater than 0".into(),
            ));
        }
        if self.max_concurrent_requests > Semaphore::MAX_PERMITS {
            return Err(GeocodingError::Config(format!(
                "max_concurrent_requests must be at most {}",
                Semaphore::MAX_PERMITS
            )));
        }
        Ok(())
    }

    /// Parse `base_url`.
    pub(crate) fn parsed_base_url(&self) -> Result<Url, GeocodingError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| GeocodingError::Config(format!("invalid base URL: {e}")))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(GeocodingError::Config(format!(
                "invalid base URL: unsupported scheme '{other}'"
            ))),
        }
    }
}
