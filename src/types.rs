//! Locations, per-call search options, and the service's JSON envelopes.

use serde::{Deserialize, Deserializer, Serialize};

/// Result count used when [`SearchOptions::count`] is unset.
pub const DEFAULT_COUNT: u32 = 10;
/// Largest result count the service accepts.
pub const MAX_COUNT: u32 = 100;
/// Language used when [`SearchOptions::language`] is unset.
pub const DEFAULT_LANGUAGE: &str = "en";

/// A single location matching a search, as returned by the service.
///
/// Admin fields follow the GeoNames administrative hierarchy
/// (`admin1` is the first-order division, e.g. a state). Any of them may be
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// GeoNames identifier.
    pub id: i64,
    /// Localised display name.
    pub name: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Elevation above sea level in meters.
    #[serde(default, deserialize_with = "null_as_default")]
    pub elevation: f64,
    /// Localised country name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub country_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub admin1: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub admin2: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub admin3: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub admin4: String,
}

/// Optional per-call tuning for a search.
///
/// Unset fields fall back to [`DEFAULT_COUNT`] and [`DEFAULT_LANGUAGE`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of results, 1 to 100.
    pub count: Option<u32>,
    /// Two-letter language code for localised names.
    pub language: Option<String>,
}

impl SearchOptions {
    /// Create options with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of results.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Request names in the given language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Success-path envelope. `results` is missing entirely when nothing matched.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Location>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub error: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Body sent alongside non-success status codes.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub reason: String,
}

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_decodes_full_record() {
        let json = r#"{
            "id": 2950159, "name": "Berlin", "latitude": 52.52437, "longitude": 13.41053,
            "elevation": 74.0, "feature_code": "PPLC", "country_code": "DE",
            "admin1_id": 2950157, "timezone": "Europe/Berlin", "population": 3426354,
            "country": "Deutschland", "admin1": "Land Berlin"
        }"#;
        let loc: Location = serde_json::from_str(json).expect("decode");
        assert_eq!(loc.id, 2950159);
        assert_eq!(loc.name, "Berlin");
        assert!((loc.latitude - 52.52437).abs() < f64::EPSILON);
        assert!((loc.longitude - 13.41053).abs() < f64::EPSILON);
        assert!((loc.elevation - 74.0).abs() < f64::EPSILON);
        assert_eq!(loc.country_code, "DE");
        assert_eq!(loc.admin1, "Land Berlin");
        assert!(loc.admin2.is_empty());
    }

    #[test]
    fn location_tolerates_missing_optional_fields() {
        let json = r#"{"id": 1, "name": "Nowhere", "latitude": 0.5, "longitude": -0.5}"#;
        let loc: Location = serde_json::from_str(json).expect("decode");
        assert!(loc.country.is_empty());
        assert!(loc.country_code.is_empty());
        assert!(loc.elevation.abs() < f64::EPSILON);
    }

    #[test]
    fn location_treats_null_optional_fields_as_empty() {
        let json = r#"{"id": 1, "name": "A", "latitude": 1.0, "longitude": 1.0,
            "elevation": null, "country": null, "country_code": null,
            "admin1": "North", "admin2": null, "admin3": null, "admin4": null}"#;
        let loc: Location = serde_json::from_str(json).expect("decode");
        assert!(loc.elevation.abs() < f64::EPSILON);
        assert!(loc.country.is_empty());
        assert!(loc.country_code.is_empty());
        assert_eq!(loc.admin1, "North");
        assert!(loc.admin2.is_empty());
        assert!(loc.admin4.is_empty());
    }

    #[test]
    fn location_requires_coordinates() {
        let json = r#"{"id": 1, "name": "Nowhere"}"#;
        assert!(serde_json::from_str::<Location>(json).is_err());
    }

    #[test]
    fn response_without_results_is_empty() {
        let resp: SearchResponse =
            serde_json::from_str(r#"{"generationtime_ms": 0.4}"#).expect("decode");
        assert!(resp.results.is_empty());
        assert!(!resp.error);
        assert!(resp.reason.is_none());
    }

    #[test]
    fn response_error_flag() {
        let resp: SearchResponse =
            serde_json::from_str(r#"{"error": true, "reason": "X"}"#).expect("decode");
        assert!(resp.error);
        assert_eq!(resp.reason.as_deref(), Some("X"));
    }

    #[test]
    fn response_with_null_fields_is_empty() {
        let resp: SearchResponse =
            serde_json::from_str(r#"{"results": null, "error": null, "reason": null}"#)
                .expect("decode");
        assert!(resp.results.is_empty());
        assert!(!resp.error);
        assert!(resp.reason.is_none());

        let env: ErrorEnvelope = serde_json::from_str(r#"{"reason": null}"#).expect("decode");
        assert!(env.reason.is_empty());
    }

    #[test]
    fn error_envelope_without_reason_is_empty() {
        let env: ErrorEnvelope = serde_json::from_str("{}").expect("decode");
        assert!(env.reason.is_empty());
    }

    #[test]
    fn search_options_builder() {
        let opts = SearchOptions::new().with_count(5).with_language("de");
        assert_eq!(opts.count, Some(5));
        assert_eq!(opts.language.as_deref(), Some("de"));
        assert_eq!(SearchOptions::default(), SearchOptions::new());
    }
}
