//! Integration tests for the metadata provider and the review flow
//!
//! These tests use wiremock to stand in for the OMDb service.

use cinecrawl::catalog::{MetadataProvider, MovieCatalog, OmdbProvider, Review, ReviewStore};
use cinecrawl::config::{ProviderConfig, UserAgentConfig};
use cinecrawl::storage::{SqliteStorage, Storage};
use cinecrawl::ProviderError;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(endpoint: &str) -> OmdbProvider {
    let config = ProviderConfig {
        endpoint: endpoint.to_string(),
        api_key: Some("test-key".to_string()),
        timeout_secs: 5,
    };
    let user_agent = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    };
    OmdbProvider::new(&config, &user_agent).expect("Failed to build provider")
}

async fn mount_movie(server: &MockServer, title: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("t", title))
        .and(query_param("plot", "short"))
        .and(query_param("r", "json"))
        .and(query_param("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_lookup_returns_parsed_document() {
    let server = MockServer::start().await;
    mount_movie(
        &server,
        "The Big Lebowski",
        json!({"Title": "The Big Lebowski", "Year": "1998", "Response": "True"}),
    )
    .await;

    let provider = provider_for(&server.uri());
    let info = provider.lookup("The Big Lebowski").await.unwrap();

    assert_eq!(info["Year"], json!("1998"));
}

#[tokio::test]
async fn test_title_travels_with_plus_for_spaces() {
    let server = MockServer::start().await;
    mount_movie(&server, "No Country for Old Men", json!({"Response": "True"})).await;

    let provider = provider_for(&server.uri());
    provider.lookup("No Country for Old Men").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0]
        .url
        .query()
        .unwrap()
        .starts_with("t=No+Country+for+Old+Men&"));
}

#[tokio::test]
async fn test_not_found_payload_is_still_a_record() {
    let server = MockServer::start().await;
    mount_movie(
        &server,
        "Unknown",
        json!({"Response": "False", "Error": "Movie not found!"}),
    )
    .await;

    let provider = provider_for(&server.uri());
    let info = provider.lookup("Unknown").await.unwrap();

    assert_eq!(info["Response"], json!("False"));
}

#[tokio::test]
async fn test_unparseable_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Service down</html>"))
        .mount(&server)
        .await;

    let provider = provider_for(&server.uri());
    let result = provider.lookup("Heat").await;

    assert!(matches!(result, Err(ProviderError::Unparseable { .. })));
}

#[tokio::test]
async fn test_network_failure() {
    // Nothing listens on port 1
    let provider = provider_for("http://127.0.0.1:1/");
    let result = provider.lookup("Heat").await;

    assert!(matches!(result, Err(ProviderError::Network { .. })));
}

#[tokio::test]
async fn test_review_flow_catalogs_movie_from_provider() {
    let server = MockServer::start().await;
    mount_movie(
        &server,
        "Heat",
        json!({"Title": "Heat", "Year": "1995", "Director": "Michael Mann"}),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let storage: Arc<dyn Storage> =
        Arc::new(SqliteStorage::new(&dir.path().join("reviews.db")).unwrap());
    let catalog = Arc::new(MovieCatalog::new(
        storage.clone(),
        Arc::new(provider_for(&server.uri())),
    ));
    let reviews = ReviewStore::new(storage, catalog.clone());

    let review: Review = serde_json::from_value(json!({
        "itemReviewed": {"name": "Heat"},
        "url": "https://reviews.example.com/heat",
        "reviewBody": "A masterclass in tension.",
        "rank": 12.0
    }))
    .unwrap();

    assert!(reviews.add_review(review.clone()).await.is_some());
    assert!(reviews.add_review(review).await.is_none());

    assert_eq!(catalog.list_movies(), vec!["Heat"]);
    assert_eq!(catalog.get_movie_info("Heat").unwrap()["Director"], json!("Michael Mann"));

    reviews.update_rank("https://reviews.example.com/heat", 7.5);
    let stored = reviews.list_reviews("Heat");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].rank, 7.5);
    assert_eq!(stored[0].fields["reviewBody"], json!("A masterclass in tension."));

    // The movie was catalogued by the first review; the provider was hit once
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_review_flow_survives_provider_outage() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let storage: Arc<dyn Storage> = Arc::new(SqliteStorage::new_in_memory().unwrap());
    let catalog = Arc::new(MovieCatalog::new(
        storage.clone(),
        Arc::new(provider_for(&server.uri())),
    ));
    let reviews = ReviewStore::new(storage, catalog.clone());

    let id = reviews
        .add_review(Review::new("Heat", "https://reviews.example.com/heat"))
        .await;

    assert!(id.is_some());
    assert!(catalog.list_movies().is_empty());
    assert_eq!(reviews.list_reviews("Heat").len(), 1);
}
