//! Search and details cache store.
//!
//! `MoviesState` holds the pure transitions; `MoviesStore` drives them around
//! provider calls. The lock is only taken for the short pending and settle
//! writes, never across a request.

use cinesearch_models::{MovieDetails, MovieSummary, SearchResultPage, SearchResults};
use cinesearch_sources::{ClientError, MovieProvider};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use crate::status::LoadStatus;

const SEARCH_ERROR_FALLBACK: &str = "Something went wrong";
const DETAILS_ERROR_FALLBACK: &str = "Failed to fetch movie details";

/// Results per search page; fixed by the provider
pub const SEARCH_PAGE_SIZE: u32 = 10;

/// Normalized search cache key: trimmed, lowercased query plus page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchKey {
    query: String,
    page: u32,
}

impl SearchKey {
    pub fn new(query: &str, page: u32) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            page,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }
}

impl fmt::Display for SearchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.query, self.page)
    }
}

/// A settled search, fresh or served from the cache
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub results: SearchResults,
    pub query: String,
    pub page: u32,
    pub from_cache: bool,
}

/// A settled details lookup
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsOutcome {
    pub imdb_id: String,
    pub movie: MovieDetails,
    pub from_cache: bool,
}

#[derive(Debug, Clone)]
pub struct MoviesState {
    pub movies: Vec<MovieSummary>,
    pub current_query: String,
    pub current_page: u32,
    pub total_results: u32,
    pub search_status: LoadStatus,
    pub error: Option<String>,
    pub selected_movie: Option<MovieDetails>,
    pub details_status: LoadStatus,
    pub details_error: Option<String>,
    /// Last (query, page) handed to `search_pending`, kept for retry
    last_search: Option<(String, u32)>,
    last_details: Option<String>,
    search_cache: HashMap<SearchKey, SearchResultPage>,
    details_cache: HashMap<String, MovieDetails>,
}

impl Default for MoviesState {
    fn default() -> Self {
        Self {
            movies: Vec::new(),
            current_query: String::new(),
            current_page: 1,
            total_results: 0,
            search_status: LoadStatus::Idle,
            error: None,
            selected_movie: None,
            details_status: LoadStatus::Idle,
            details_error: None,
            last_search: None,
            last_details: None,
            search_cache: HashMap::new(),
            details_cache: HashMap::new(),
        }
    }
}

fn message_or(message: &str, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message.to_string()
    }
}

impl MoviesState {
    pub fn cached_search(&self, query: &str, page: u32) -> Option<&SearchResultPage> {
        self.search_cache.get(&SearchKey::new(query, page))
    }

    pub fn cached_details(&self, imdb_id: &str) -> Option<&MovieDetails> {
        self.details_cache.get(imdb_id)
    }

    pub fn cached_search_count(&self) -> usize {
        self.search_cache.len()
    }

    pub fn cached_details_count(&self) -> usize {
        self.details_cache.len()
    }

    pub fn has_more(&self) -> bool {
        self.movies.len() < self.total_results as usize
    }

    /// Whether the provider has a page after `current_page`, independent of
    /// which page the list started from
    pub fn has_next_page(&self) -> bool {
        u64::from(self.current_page) * u64::from(SEARCH_PAGE_SIZE) < u64::from(self.total_results)
    }

    pub fn last_search(&self) -> Option<(&str, u32)> {
        self.last_search.as_ref().map(|(q, p)| (q.as_str(), *p))
    }

    pub fn search_pending(&mut self, query: &str, page: u32) {
        if self.cached_search(query, page).is_none() {
            self.search_status = LoadStatus::Loading;
        }
        self.error = None;
        self.last_search = Some((query.to_string(), page));
    }

    pub fn search_fulfilled(&mut self, outcome: SearchOutcome) {
        let SearchOutcome { results, query, page, from_cache } = outcome;

        if !from_cache {
            self.search_cache
                .insert(SearchKey::new(&query, page), SearchResultPage::new(&query, page, results.clone()));
        }

        if page <= 1 {
            self.movies = results.movies;
        } else {
            let existing: HashSet<String> = self.movies.iter().map(|m| m.imdb_id.clone()).collect();
            self.movies
                .extend(results.movies.into_iter().filter(|m| !existing.contains(&m.imdb_id)));
        }

        self.current_query = query;
        self.current_page = page;
        self.total_results = results.total_results;
        self.search_status = LoadStatus::Succeeded;
    }

    /// The result list is left as it was
    pub fn search_rejected(&mut self, message: &str) {
        self.search_status = LoadStatus::Failed;
        self.error = Some(message_or(message, SEARCH_ERROR_FALLBACK));
    }

    /// Reset the visible search; both caches survive
    pub fn clear_search(&mut self) {
        self.movies.clear();
        self.current_query.clear();
        self.current_page = 1;
        self.total_results = 0;
        self.error = None;
        self.search_status = LoadStatus::Idle;
        self.last_search = None;
    }

    pub fn details_pending(&mut self, imdb_id: &str) {
        if self.cached_details(imdb_id).is_none() {
            self.details_status = LoadStatus::Loading;
        }
        self.details_error = None;
        self.last_details = Some(imdb_id.to_string());
    }

    pub fn details_fulfilled(&mut self, outcome: DetailsOutcome) {
        if !outcome.from_cache {
            self.details_cache.insert(outcome.imdb_id, outcome.movie.clone());
        }
        self.selected_movie = Some(outcome.movie);
        self.details_status = LoadStatus::Succeeded;
    }

    pub fn details_rejected(&mut self, message: &str) {
        self.details_status = LoadStatus::Failed;
        self.details_error = Some(message_or(message, DETAILS_ERROR_FALLBACK));
    }

    pub fn clear_movie_details(&mut self) {
        self.selected_movie = None;
        self.details_error = None;
        self.details_status = LoadStatus::Idle;
    }
}

/// Async front of [`MoviesState`]
#[derive(Debug, Default)]
pub struct MoviesStore {
    state: RwLock<MoviesState>,
}

impl MoviesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search one page. A cached key settles immediately without touching the provider.
    ///
    /// A blank query clears the visible search instead of issuing a request.
    pub async fn search(
        &self,
        provider: &dyn MovieProvider,
        query: &str,
        page: u32,
    ) -> Result<SearchOutcome, ClientError> {
        let query = query.trim().to_string();
        let page = page.max(1);

        if query.is_empty() {
            self.state.write().await.clear_search();
            return Ok(SearchOutcome {
                results: SearchResults::default(),
                query,
                page: 1,
                from_cache: false,
            });
        }

        let cached = {
            let mut state = self.state.write().await;
            state.search_pending(&query, page);
            state.cached_search(&query, page).map(SearchResultPage::to_results)
        };

        if let Some(results) = cached {
            debug!("Cache hit: search '{}' page {}", query, page);
            let outcome = SearchOutcome {
                results,
                query,
                page,
                from_cache: true,
            };
            self.state.write().await.search_fulfilled(outcome.clone());
            return Ok(outcome);
        }

        debug!("Cache miss: search '{}' page {}", query, page);
        match provider.search(&query, page).await {
            Ok(results) => {
                info!(
                    "Fetched {} movies for '{}' page {} ({} total)",
                    results.movies.len(),
                    query,
                    page,
                    results.total_results
                );
                let outcome = SearchOutcome {
                    results,
                    query,
                    page,
                    from_cache: false,
                };
                self.state.write().await.search_fulfilled(outcome.clone());
                Ok(outcome)
            }
            Err(e) => {
                warn!("Search '{}' page {} failed: {}", query, page, e);
                self.state.write().await.search_rejected(&e.to_string());
                Err(e)
            }
        }
    }

    /// Next page of the current query. `None` when loading, exhausted or idle.
    pub async fn load_more(&self, provider: &dyn MovieProvider) -> Result<Option<SearchOutcome>, ClientError> {
        let next = {
            let state = self.state.read().await;
            if state.search_status.is_loading()
                || !state.has_more()
                || !state.has_next_page()
                || state.current_query.is_empty()
            {
                None
            } else {
                Some((state.current_query.clone(), state.current_page + 1))
            }
        };

        match next {
            Some((query, page)) => self.search(provider, &query, page).await.map(Some),
            None => {
                debug!("Nothing more to load");
                Ok(None)
            }
        }
    }

    /// Re-issue the last requested search, if any
    pub async fn retry(&self, provider: &dyn MovieProvider) -> Result<Option<SearchOutcome>, ClientError> {
        let last = self
            .state
            .read()
            .await
            .last_search()
            .map(|(q, p)| (q.to_string(), p));

        match last {
            Some((query, page)) => self.search(provider, &query, page).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn fetch_details(
        &self,
        provider: &dyn MovieProvider,
        imdb_id: &str,
    ) -> Result<DetailsOutcome, ClientError> {
        let imdb_id = imdb_id.trim().to_string();

        let cached = {
            let mut state = self.state.write().await;
            state.details_pending(&imdb_id);
            state.cached_details(&imdb_id).cloned()
        };

        if let Some(movie) = cached {
            debug!("Cache hit: details {}", imdb_id);
            let outcome = DetailsOutcome {
                imdb_id,
                movie,
                from_cache: true,
            };
            self.state.write().await.details_fulfilled(outcome.clone());
            return Ok(outcome);
        }

        debug!("Cache miss: details {}", imdb_id);
        match provider.details(&imdb_id).await {
            Ok(movie) => {
                info!("Fetched details for {} ({})", imdb_id, movie.title);
                let outcome = DetailsOutcome {
                    imdb_id,
                    movie,
                    from_cache: false,
                };
                self.state.write().await.details_fulfilled(outcome.clone());
                Ok(outcome)
            }
            Err(e) => {
                warn!("Details for {} failed: {}", imdb_id, e);
                self.state.write().await.details_rejected(&e.to_string());
                Err(e)
            }
        }
    }

    /// Re-issue the last details lookup, if any
    pub async fn retry_details(&self, provider: &dyn MovieProvider) -> Result<Option<DetailsOutcome>, ClientError> {
        let last = self.state.read().await.last_details.clone();
        match last {
            Some(imdb_id) => self.fetch_details(provider, &imdb_id).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn clear_search(&self) {
        self.state.write().await.clear_search();
    }

    pub async fn clear_movie_details(&self) {
        self.state.write().await.clear_movie_details();
    }

    pub async fn snapshot(&self) -> MoviesState {
        self.state.read().await.clone()
    }

    pub async fn movies(&self) -> Vec<MovieSummary> {
        self.state.read().await.movies.clone()
    }

    pub async fn has_more(&self) -> bool {
        self.state.read().await.has_more()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.search_status.is_loading()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn details_error(&self) -> Option<String> {
        self.state.read().await.details_error.clone()
    }

    pub async fn selected_movie(&self) -> Option<MovieDetails> {
        self.state.read().await.selected_movie.clone()
    }

    pub async fn cached_search_count(&self) -> usize {
        self.state.read().await.cached_search_count()
    }
}
