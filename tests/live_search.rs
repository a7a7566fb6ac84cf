//! Live tests against the public Open-Meteo geocoding service.
//!
//! Marked `#[ignore]`; run with `cargo test -- --ignored`.

use std::time::Duration;

use open_meteo_geocoding::{GeocodingClient, GeocodingConfig, GeocodingError, SearchOptions};

#[tokio::test]
#[ignore] // Live test — requires network access
async fn live_search_finds_berlin() {
    let client = GeocodingClient::new(GeocodingConfig::default()).expect("default config");

    let locations = tokio::time::timeout(Duration::from_secs(10), client.search("Berlin", None))
        .await
        .expect("live search timed out")
        .expect("live search should work");

    assert!(!locations.is_empty());
    assert!(
        locations
            .iter()
            .any(|loc| loc.name == "Berlin" && loc.country_code == "DE"),
        "expected Berlin, DE in results"
    );
    assert_eq!(client.gate().in_flight(), 0);
}

#[tokio::test]
#[ignore] // Live test — requires network access
async fn live_search_respects_count_and_language() {
    let client = GeocodingClient::new(GeocodingConfig::default()).expect("default config");
    let opts = SearchOptions::new().with_count(3).with_language("de");

    let locations = client
        .search("Paris", Some(&opts))
        .await
        .expect("live search should work");

    assert!(locations.len() <= 3);
}

#[tokio::test]
#[ignore] // Live test — requires network access
async fn live_search_unknown_place_is_empty_not_error() {
    let client = GeocodingClient::new(GeocodingConfig::default()).expect("default config");

    let result = client.search("Qxzzvbnmplkj", None).await;

    match result {
        Ok(locations) => assert!(locations.is_empty()),
        Err(GeocodingError::Transport(e)) => panic!("network unavailable: {e}"),
        Err(other) => panic!("unexpected error: {other}"),
    }
}
