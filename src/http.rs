//! Default HTTP transport for geocoding requests.

use crate::config::GeocodingConfig;
use crate::error::GeocodingError;
use std::time::Duration;

/// User-Agent sent when the configuration does not set one.
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] for the geocoding service.
///
/// The client has:
/// - Whole-request timeout from config
/// - User-Agent from config, or [`DEFAULT_USER_AGENT`]
/// - gzip decompression
///
/// # Errors
///
/// Returns [`GeocodingError::Config`] if the client cannot be constructed.
pub fn build_client(config: &GeocodingConfig) -> Result<reqwest::Client, GeocodingError> {
    let ua = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .build()
        .map_err(|e| GeocodingError::Config(format!("failed to build HTTP client: {e}")))
}
