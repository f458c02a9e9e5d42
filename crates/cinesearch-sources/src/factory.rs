//! Builds the two data clients from configuration.

use anyhow::Result;
use cinesearch_config::{Config, CredentialStore};
use std::sync::Arc;
use tracing::{debug, warn};
use crate::omdb::client::create_http_client;
use crate::{MovieProvider, OmdbClient, ReviewBackend, ReviewsClient};

/// The movie provider and review backend, ready to hand to the stores
#[derive(Clone)]
pub struct Clients {
    pub movies: Arc<dyn MovieProvider>,
    pub reviews: Arc<dyn ReviewBackend>,
}

/// Validate the config and build both clients sharing one HTTP connection pool.
///
/// A missing OMDb key is not an error here: the provider reports it on every
/// call so the user sees it where they search.
pub fn build_clients(config: &Config, credentials: &CredentialStore) -> Result<Clients> {
    config.validate()?;

    let http = Arc::new(create_http_client());
    let api_key = config.resolve_api_key(credentials);
    if api_key.is_none() {
        warn!("No OMDb API key configured; movie searches will fail until one is set");
    }

    debug!("OMDb base URL: {}, reviews base URL: {}", config.omdb.base_url, config.reviews.base_url);

    Ok(Clients {
        movies: Arc::new(OmdbClient::with_client(http.clone(), config.omdb.base_url.clone(), api_key)),
        reviews: Arc::new(ReviewsClient::with_client(http, config.reviews.base_url.clone())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_build_clients_rejects_invalid_config() {
        let mut config = Config::default();
        config.reviews.base_url = "localhost:3001".to_string();
        let creds = CredentialStore::new(PathBuf::from("/tmp/unused"));
        assert!(build_clients(&config, &creds).is_err());
    }

    #[test]
    fn test_build_clients_without_key() {
        let config = Config::default();
        let creds = CredentialStore::new(PathBuf::from("/tmp/unused"));
        let clients = build_clients(&config, &creds).unwrap();
        assert_eq!(clients.movies.provider_name(), "omdb");
    }
}
