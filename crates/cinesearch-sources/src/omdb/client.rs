use crate::error::ClientError;
use crate::omdb::api;
use crate::traits::MovieProvider;
use async_trait::async_trait;
use cinesearch_models::{MovieDetails, SearchResults};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

const MISSING_KEY_MESSAGE: &str =
    "OMDb API key is not configured. Set OMDB_API_KEY or run `cinesearch config omdb`.";

pub(crate) fn create_http_client() -> Client {
    Client::builder()
        .user_agent(concat!("cinesearch/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(20))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// OMDb-backed movie provider. A missing key is reported per call, before any request is made.
#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: Option<String>,
}

impl OmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self::with_client(Arc::new(create_http_client()), base_url, api_key)
    }

    pub fn with_client(client: Arc<Client>, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, ClientError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ClientError::configuration(MISSING_KEY_MESSAGE))
    }
}

#[async_trait]
impl MovieProvider for OmdbClient {
    fn provider_name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &str, page: u32) -> Result<SearchResults, ClientError> {
        let api_key = self.api_key()?;
        api::search_movies(&self.client, &self.base_url, api_key, query, page).await
    }

    async fn details(&self, imdb_id: &str) -> Result<MovieDetails, ClientError> {
        let api_key = self.api_key()?;
        api::get_movie_details(&self.client, &self.base_url, api_key, imdb_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_blank_key_is_treated_as_missing() {
        let client = OmdbClient::new("http://localhost", Some("   ".to_string()));
        assert!(!client.has_api_key());
        assert_eq!(client.api_key().unwrap_err().kind(), ErrorKind::Configuration);
    }
}
