//! The geocoding client and its search operation.
//!
//! A search runs strictly in order: validate the name and options, take a
//! slot from the [`RequestGate`], build the URL, send one GET, decode. The
//! slot is held by a [`GatePermit`](crate::gate::GatePermit) for the rest of
//! the call and returned when it drops, whichever way the call ends.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::GeocodingConfig;
use crate::error::{GeocodingError, Result};
use crate::gate::RequestGate;
use crate::http;
use crate::types::{
    ErrorEnvelope, Location, SearchOptions, SearchResponse, DEFAULT_COUNT, DEFAULT_LANGUAGE,
    MAX_COUNT,
};

/// Query parameters owned by a search. Same-named parameters on the base
/// URL are replaced.
const SEARCH_PARAMS: [&str; 4] = ["name", "format", "count", "language"];

/// Largest response body a search will read. A full 100-result page is a
/// few tens of kilobytes.
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Client for the Open-Meteo geocoding search endpoint.
///
/// Cloning is cheap: clones share the transport and the request gate, so
/// the concurrency limit applies across all of them.
///
/// # Examples
///
/// ```no_run
/// use open_meteo_geocoding::{GeocodingClient, GeocodingConfig, SearchOptions};
///
/// # async fn example() -> open_meteo_geocoding::Result<()> {
/// let client = GeocodingClient::new(GeocodingConfig::default())?;
/// let options = SearchOptions::new().with_count(5).with_language("de");
/// for loc in client.search("Berlin", Some(&options)).await? {
///     println!("{} ({}): {}, {}", loc.name, loc.country_code, loc.latitude, loc.longitude);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    base_url: Url,
    http: reqwest::Client,
    gate: Arc<RequestGate>,
}

impl GeocodingClient {
    /// Create a client with a transport built from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError::Config`] if the configuration is invalid or
    /// the transport cannot be built.
    pub fn new(config: GeocodingConfig) -> Result<Self> {
        let http = http::build_client(&config)?;
        Self::with_http_client(config, http)
    }

    /// Create a client that sends requests through a caller-supplied
    /// transport. `config.timeout_seconds` and `config.user_agent` are not
    /// applied to it.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError::Config`] if the configuration is invalid.
    pub fn with_http_client(config: GeocodingConfig, http: reqwest::Client) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            base_url: config.parsed_base_url()?,
            http,
            gate: Arc::new(RequestGate::new(config.max_concurrent_requests)),
        })
    }

    /// The configured search endpoint.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The gate bounding this client's in-flight searches.
    pub fn gate(&self) -> &RequestGate {
        &self.gate
    }

    /// Search for locations by name.
    ///
    /// Results are returned in the service's relevance order. An empty list
    /// means nothing matched. Dropping the returned future aborts the request
    /// and frees its slot.
    ///
    /// # Errors
    ///
    /// - [`GeocodingError::InvalidParameter`] for an empty name, a count
    ///   outside 1..=100, or a language that is not two characters
    /// - [`GeocodingError::ConcurrencyLimitExceeded`] when every slot is taken
    /// - [`GeocodingError::Transport`] for connection, timeout, or body read failures
    /// - [`GeocodingError::Api`] when the service rejects the query, whatever
    ///   the HTTP status
    /// - [`GeocodingError::Status`] for other non-success statuses
    /// - [`GeocodingError::Decode`] when the body is not a search envelope or
    ///   is larger than [`MAX_RESPONSE_BYTES`]
    pub async fn search(
        &self,
        name: &str,
        options: Option<&SearchOptions>,
    ) -> Result<Vec<Location>> {
        let (count, language) = resolve_options(name, options)?;

        let Some(_permit) = self.gate.try_acquire() else {
            tracing::debug!(
                capacity = self.gate.capacity(),
                "search rejected: concurrency limit reached"
            );
            return Err(GeocodingError::ConcurrencyLimitExceeded);
        };

        tracing::trace!(name, count, language, "geocoding search");
        let url = self.search_url(name, count, language);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| GeocodingError::Transport(format!("request failed: {e}")))?;

        let status = response.status();
        let body = read_body(response).await?;

        if !status.is_success() {
            let err = error_from_status(status.as_u16(), &body);
            tracing::debug!(status = status.as_u16(), error = %err, "geocoding request failed");
            return Err(err);
        }

        let results = decode_results(&body)?;
        tracing::debug!(count = results.len(), "geocoding results decoded");
        Ok(results)
    }

    /// Like [`search`](Self::search), but gives up with
    /// [`GeocodingError::Transport`] as soon as `cancel` fires.
    ///
    /// A token that is already cancelled aborts before a slot is taken.
    pub async fn search_with_cancel(
        &self,
        name: &str,
        options: Option<&SearchOptions>,
        cancel: &CancellationToken,
    ) -> Result<Vec<Location>> {
        if cancel.is_cancelled() {
            return Err(GeocodingError::Transport("request cancelled".into()));
        }
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!("geocoding search cancelled");
                Err(GeocodingError::Transport("request cancelled".into()))
            }
            result = self.search(name, options) => result,
        }
    }

    /// Build the request URL from the base URL and effective parameters.
    fn search_url(&self, name: &str, count: u32, language: &str) -> Url {
        let mut url = self.base_url.clone();
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| !SEARCH_PARAMS.contains(&key.as_ref()))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            for (key, value) in &kept {
                pairs.append_pair(key, value);
            }
            pairs
                .append_pair("name", name)
                .append_pair("format", "json")
                .append_pair("count", &count.to_string())
                .append_pair("language", language);
        }
        url
    }
}

/// Read the body, refusing anything larger than [`MAX_RESPONSE_BYTES`].
async fn read_body(mut response: reqwest::Response) -> Result<Vec<u8>> {
    let too_large = || {
        GeocodingError::Decode(format!(
            "response body exceeds {MAX_RESPONSE_BYTES} bytes"
        ))
    };
    if response
        .content_length()
        .is_some_and(|len| len > MAX_RESPONSE_BYTES as u64)
    {
        return Err(too_large());
    }

    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| GeocodingError::Transport(format!("failed to read response: {e}")))?
    {
        if body.len() + chunk.len() > MAX_RESPONSE_BYTES {
            return Err(too_large());
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Validate the name and options and apply defaults.
fn resolve_options<'a>(name: &str, options: Option<&'a SearchOptions>) -> Result<(u32, &'a str)> {
    if name.is_empty() {
        return Err(GeocodingError::InvalidParameter(
            "name must not be empty".into(),
        ));
    }

    let mut count = DEFAULT_COUNT;
    let mut language = DEFAULT_LANGUAGE;
    if let Some(options) = options {
        if let Some(c) = options.count {
            if !(1..=MAX_COUNT).contains(&c) {
                return Err(GeocodingError::InvalidParameter(
                    "count must be between 1 and 100".into(),
                ));
            }
            count = c;
        }
        if let Some(lang) = options.language.as_deref() {
            if lang.chars().count() != 2 {
                return Err(GeocodingError::InvalidParameter(
                    "language must be a 2-letter code".into(),
                ));
            }
            language = lang;
        }
    }
    Ok((count, language))
}

/// Map a non-success response to an error, preferring the service's reason.
fn error_from_status(status: u16, body: &[u8]) -> GeocodingError {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.reason.is_empty() => GeocodingError::Api {
            reason: envelope.reason,
        },
        _ => GeocodingError::Status(status),
    }
}

/// Decode a success body. The service also reports some rejections here.
fn decode_results(body: &[u8]) -> Result<Vec<Location>> {
    let response: SearchResponse = serde_json::from_slice(body)
        .map_err(|e| GeocodingError::Decode(format!("failed to decode response: {e}")))?;

    if response.error {
        let reason = response.reason.unwrap_or_default();
        tracing::debug!(%reason, "geocoding service reported an error");
        return Err(GeocodingError::Api { reason });
    }
    Ok(response.results)
}
