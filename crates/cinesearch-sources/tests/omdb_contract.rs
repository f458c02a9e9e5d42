//! OMDb client contract tests: request shape, `Response` discrimination, error mapping.

use cinesearch_sources::{ErrorKind, MovieProvider, OmdbClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn search_body() -> serde_json::Value {
    json!({
        "Search": [
            {"Title": "The Matrix", "Year": "1999", "imdbID": "tt0133093", "Type": "movie", "Poster": "https://example.com/m.jpg"},
            {"Title": "The Matrix Reloaded", "Year": "2003", "imdbID": "tt0234215", "Type": "movie", "Poster": "N/A"}
        ],
        "totalResults": "50",
        "Response": "True"
    })
}

#[tokio::test]
async fn test_search_sends_expected_query_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("apikey", "test-key"))
        .and(query_param("s", "Matrix"))
        .and(query_param("page", "2"))
        .and(query_param("type", "movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OmdbClient::new(mock_server.uri(), Some("test-key".to_string()));
    let results = client.search("Matrix", 2).await.unwrap();

    assert_eq!(results.total_results, 50);
    assert_eq!(results.movies.len(), 2);
    assert_eq!(results.movies[0].imdb_id, "tt0133093");
    assert_eq!(results.movies[1].poster, None);
}

#[tokio::test]
async fn test_search_response_false_is_not_found_with_provider_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": "False",
            "Error": "Movie not found!"
        })))
        .mount(&mock_server)
        .await;

    let client = OmdbClient::new(mock_server.uri(), Some("test-key".to_string()));
    let err = client.search("qwertyuiop", 1).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "Movie not found!");
}

#[tokio::test]
async fn test_missing_key_fails_without_a_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = OmdbClient::new(mock_server.uri(), None);

    let err = client.search("Matrix", 1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);

    let err = client.details("tt0133093").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[tokio::test]
async fn test_details_requests_full_plot() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("i", "tt0133093"))
        .and(query_param("plot", "full"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Title": "The Matrix",
            "Year": "1999",
            "Runtime": "136 min",
            "Genre": "Action, Sci-Fi",
            "Director": "Lana Wachowski, Lilly Wachowski",
            "Actors": "Keanu Reeves, Laurence Fishburne",
            "Plot": "When a beautiful stranger leads computer hacker Neo...",
            "Ratings": [{"Source": "Rotten Tomatoes", "Value": "83%"}],
            "imdbRating": "8.7",
            "imdbID": "tt0133093",
            "Response": "True"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OmdbClient::new(mock_server.uri(), Some("test-key".to_string()));
    let details = client.details("tt0133093").await.unwrap();

    assert_eq!(details.title, "The Matrix");
    assert_eq!(details.runtime, "136 min");
    assert_eq!(details.ratings[0].value, "83%");
}

#[tokio::test]
async fn test_details_unknown_id_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("i", "tt0000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": "False",
            "Error": "Incorrect IMDb ID."
        })))
        .mount(&mock_server)
        .await;

    let client = OmdbClient::new(mock_server.uri(), Some("test-key".to_string()));
    let err = client.details("tt0000000").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.message(), "Incorrect IMDb ID.");
}

#[tokio::test]
async fn test_http_error_status_is_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "Response": "False",
            "Error": "Invalid API key!"
        })))
        .mount(&mock_server)
        .await;

    let client = OmdbClient::new(mock_server.uri(), Some("bad-key".to_string()));
    let err = client.search("Matrix", 1).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.message().contains("401"));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = OmdbClient::new(mock_server.uri(), Some("test-key".to_string()));
    let err = client.search("Matrix", 1).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
}
