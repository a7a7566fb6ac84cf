//! Error types for the geocoding client.
//!
//! Every failure of a search is surfaced as exactly one [`GeocodingError`].
//! Nothing is retried or swallowed internally; retry policy belongs to the
//! caller.

/// Errors that can occur while searching for locations.
#[derive(Debug, thiserror::Error)]
pub enum GeocodingError {
    /// The place name or search options violate a documented constraint.
    /// Detected before any network activity.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Every request slot is in use. The search was rejected immediately
    /// without contacting the service.
    #[error("concurrency limit exceeded")]
    ConcurrencyLimitExceeded,

    /// Connection failure, timeout, cancellation, or body read failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status without a usable `reason` in the body.
    #[error("unexpected status code: {0}")]
    Status(u16),

    /// The service rejected the query and explained why.
    #[error("api error: {reason}")]
    Api {
        /// Reason string exactly as sent by the service.
        reason: String,
    },

    /// The response body did not match the expected envelope.
    #[error("decode error: {0}")]
    Decode(String),

    /// Invalid client configuration (malformed base URL, zero capacity, ...).
    #[error("config error: {0}")]
    Config(String),
}

impl GeocodingError {
    /// Returns the service's reason string for [`GeocodingError::Api`].
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Api { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Convenience type alias for geocoding results.
pub type Result<T> = std::result::Result<T, GeocodingError>;
