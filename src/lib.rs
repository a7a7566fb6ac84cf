//! # open-meteo-geocoding
//!
//! Async client for the [Open-Meteo geocoding API](https://open-meteo.com/en/docs/geocoding-api):
//! look up a place name and get back ranked candidate locations with
//! coordinates, elevation, country, and administrative divisions.
//!
//! ## Design
//!
//! - One GET per search, built from validated parameters
//! - Fail-fast concurrency limit: when every request slot is taken, a search
//!   returns [`GeocodingError::ConcurrencyLimitExceeded`] instead of waiting
//! - Every failure is a typed [`GeocodingError`]; nothing is retried, cached,
//!   or rate limited internally
//! - The service sometimes reports rejections inside an HTTP 200 body; those
//!   surface as [`GeocodingError::Api`] like any other rejection
//!
//! ## Logging
//!
//! Place names are logged only at trace level.

pub mod client;
pub mod config;
pub mod error;
pub mod gate;
pub mod http;
pub mod types;

pub use client::GeocodingClient;
pub use config::GeocodingConfig;
pub use error::{GeocodingError, Result};
pub use gate::{GatePermit, RequestGate};
pub use types::{Location, SearchOptions};
