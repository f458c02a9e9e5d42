use cinesearch_models::{MovieDetails, MovieSummary, SearchResults};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use crate::error::ClientError;

/// Every OMDb response carries `Response: "True" | "False"` and, on failure, `Error`
#[derive(Debug, Deserialize)]
struct OmdbEnvelope {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    search: Vec<MovieSummary>,
    #[serde(rename = "totalResults", default)]
    total_results: Option<String>,
}

fn endpoint(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}

async fn get_body(client: &Client, base_url: &str, params: &[(&str, String)]) -> Result<String, ClientError> {
    let response = client
        .get(endpoint(base_url))
        .header("Accept", "application/json")
        .query(params)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(ClientError::network(format!("OMDb request failed: {} - {}", status, error_text)));
    }

    Ok(response.text().await?)
}

/// Turn `Response: "False"` into a not-found error carrying the provider's message
fn check_envelope(body: &str, fallback: &str) -> Result<(), ClientError> {
    let envelope: OmdbEnvelope = serde_json::from_str(body)?;
    if envelope.response.eq_ignore_ascii_case("false") {
        let message = envelope
            .error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        return Err(ClientError::not_found(message));
    }
    Ok(())
}

fn parse_total(total: Option<&str>) -> u32 {
    total.and_then(|t| t.trim().parse().ok()).unwrap_or(0)
}

/// Search movies by title
pub async fn search_movies(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
    page: u32,
) -> Result<SearchResults, ClientError> {
    debug!("OMDb search: '{}' page {}", query, page);

    let params = [
        ("apikey", api_key.to_string()),
        ("s", query.to_string()),
        ("page", page.to_string()),
        ("type", "movie".to_string()),
    ];
    let body = get_body(client, base_url, &params).await?;
    check_envelope(&body, "No results found")?;

    let parsed: OmdbSearchResponse = serde_json::from_str(&body)?;
    Ok(SearchResults {
        total_results: parse_total(parsed.total_results.as_deref()),
        movies: parsed.search,
    })
}

/// Fetch full details (with full plot) for one identifier
pub async fn get_movie_details(
    client: &Client,
    base_url: &str,
    api_key: &str,
    imdb_id: &str,
) -> Result<MovieDetails, ClientError> {
    debug!("OMDb details: {}", imdb_id);

    let params = [
        ("apikey", api_key.to_string()),
        ("i", imdb_id.to_string()),
        ("plot", "full".to_string()),
    ];
    let body = get_body(client, base_url, &params).await?;
    check_envelope(&body, "Movie not found")?;

    Ok(serde_json::from_str(&body)?)
}
