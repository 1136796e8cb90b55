use super::*;

fn test_client(places_base_url: &str) -> PlacesClient {
    PlacesClient::new(PlacesConfig {
        places_base_url: places_base_url.to_owned(),
        ..PlacesConfig::new("test-key")
    })
    .expect("client construction should not fail")
}

#[test]
fn build_url_puts_key_first() {
    let client = test_client("https://maps.example.com/place/nearbysearch/json");
    let url = client.build_url(
        client.places_endpoint(),
        &[("location", "40,-74".to_owned()), ("radius", "100".to_owned())],
    );
    assert_eq!(
        url.as_str(),
        "https://maps.example.com/place/nearbysearch/json?key=test-key&location=40%2C-74&radius=100"
    );
}

#[test]
fn build_url_encodes_special_characters() {
    let client = test_client("https://maps.example.com/nearby");
    let url = client.build_url(
        client.places_endpoint(),
        &[("keyword", "lake & pond".to_owned())],
    );
    assert!(
        url.as_str().contains("lake+%26+pond") || url.as_str().contains("lake%20%26%20pond"),
        "query param should be percent-encoded: {url}"
    );
}

#[test]
fn build_url_does_not_mutate_endpoint() {
    let client = test_client("https://maps.example.com/nearby");
    let _ = client.build_url(client.places_endpoint(), &[("pagetoken", "abc".to_owned())]);
    assert_eq!(client.places_endpoint().query(), None);
}

#[test]
fn rejects_unparsable_base_url() {
    let result = PlacesClient::new(PlacesConfig {
        geocode_base_url: "not a url".to_owned(),
        ..PlacesConfig::new("test-key")
    });
    assert!(matches!(result, Err(PlacesError::InvalidBaseUrl { .. })));
}

#[test]
fn rejects_non_hierarchical_base_url() {
    let result = PlacesClient::new(PlacesConfig {
        places_base_url: "mailto:someone@example.com".to_owned(),
        ..PlacesConfig::new("test-key")
    });
    assert!(matches!(result, Err(PlacesError::InvalidBaseUrl { .. })));
}

#[test]
fn unavailable_outcome_becomes_empty_error_page() {
    let err = serde_json::from_str::<()>("nope").unwrap_err();
    let outcome: FetchOutcome<NearbySearchResponse> = FetchOutcome::Unavailable {
        attempts: 3,
        error: PlacesError::Deserialize {
            context: "test".to_owned(),
            source: err,
        },
    };
    assert!(outcome.is_unavailable());
    let page = outcome.into_response();
    assert_eq!(page.status, ApiStatus::Error);
    assert!(page.results.is_empty());
    assert!(page.next_page_token.is_none());
}

#[test]
fn fetched_outcome_passes_response_through() {
    let page: NearbySearchResponse =
        serde_json::from_value(serde_json::json!({ "status": "ZERO_RESULTS", "results": [] }))
            .unwrap();
    let outcome = FetchOutcome::Fetched(page);
    assert!(!outcome.is_unavailable());
    assert_eq!(outcome.into_response().status, ApiStatus::ZeroResults);
}
