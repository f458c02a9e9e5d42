//! In-memory provider and backend used by the store tests.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use cinesearch_models::{
    MovieDetails, MovieRecord, MovieSummary, NewReview, Pagination, Review, ReviewsPage, SearchResults,
    SentimentCounts,
};
use cinesearch_sources::{ClientError, MovieProvider, ReviewBackend, ReviewQuery};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub(crate) fn summary(imdb_id: &str, title: &str) -> MovieSummary {
    MovieSummary {
        imdb_id: imdb_id.to_string(),
        title: title.to_string(),
        year: "1999".to_string(),
        media_type: Some("movie".to_string()),
        poster: None,
    }
}

/// `count` summaries with ids `tt{start}`, `tt{start+1}`, ...
pub(crate) fn summaries(start: u32, count: u32) -> Vec<MovieSummary> {
    (start..start + count)
        .map(|n| summary(&format!("tt{:07}", n), &format!("Movie {}", n)))
        .collect()
}

pub(crate) fn details(imdb_id: &str, title: &str) -> MovieDetails {
    serde_json::from_value(serde_json::json!({
        "imdbID": imdb_id,
        "Title": title,
        "Year": "1999",
        "Genre": "Action, Sci-Fi",
        "Plot": "A plot.",
        "imdbRating": "8.7",
    }))
    .unwrap()
}

pub(crate) fn review(id: &str, movie_id: &str, rating: u8) -> Review {
    Review {
        id: id.to_string(),
        movie_id: Some("m1".to_string()),
        imdb_id: movie_id.to_string(),
        rating,
        text: format!("review {}", id),
        name: "A".to_string(),
        email: String::new(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 12, 10, 15, 30).unwrap(),
        sentiment: None,
    }
}

pub(crate) fn pagination(page: u32, limit: u32, total_reviews: u32) -> Pagination {
    let total_pages = total_reviews.div_ceil(limit.max(1));
    Pagination {
        page,
        limit,
        total_reviews,
        total_pages,
        has_more: page < total_pages,
    }
}

#[derive(Default)]
pub(crate) struct FakeProvider {
    pages: HashMap<(String, u32), SearchResults>,
    details: HashMap<String, MovieDetails>,
    failure: Mutex<Option<ClientError>>,
    search_calls: AtomicUsize,
    details_calls: AtomicUsize,
}

impl FakeProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(mut self, query: &str, page: u32, movies: Vec<MovieSummary>, total: u32) -> Self {
        self.pages.insert(
            (query.to_lowercase(), page),
            SearchResults {
                movies,
                total_results: total,
            },
        );
        self
    }

    pub(crate) fn with_details(mut self, movie: MovieDetails) -> Self {
        self.details.insert(movie.imdb_id.clone(), movie);
        self
    }

    /// Every call fails with `error` until [`FakeProvider::recover`]
    pub(crate) fn fail_with(&self, error: ClientError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub(crate) fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub(crate) fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn details_calls(&self) -> usize {
        self.details_calls.load(Ordering::SeqCst)
    }

    fn failure(&self) -> Option<ClientError> {
        self.failure.lock().unwrap().clone()
    }
}

#[async_trait]
impl MovieProvider for FakeProvider {
    fn provider_name(&self) -> &str {
        "fake"
    }

    async fn search(&self, query: &str, page: u32) -> Result<SearchResults, ClientError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.failure() {
            return Err(error);
        }
        self.pages
            .get(&(query.to_lowercase(), page))
            .cloned()
            .ok_or_else(|| ClientError::not_found("Movie not found!"))
    }

    async fn details(&self, imdb_id: &str) -> Result<MovieDetails, ClientError> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.failure() {
            return Err(error);
        }
        self.details
            .get(imdb_id)
            .cloned()
            .ok_or_else(|| ClientError::not_found("Incorrect IMDb ID."))
    }
}

/// Serves canned review pages and records what was sent
#[derive(Default)]
pub(crate) struct FakeBackend {
    pages: Mutex<HashMap<(String, u32), ReviewsPage>>,
    failure: Mutex<Option<ClientError>>,
    next_id: AtomicUsize,
    list_calls: AtomicUsize,
    deleted: Mutex<Vec<String>>,
    last_query: Mutex<Option<ReviewQuery>>,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(self, movie_id: &str, page: u32, reviews_page: ReviewsPage) -> Self {
        self.set_page(movie_id, page, reviews_page);
        self
    }

    pub(crate) fn set_page(&self, movie_id: &str, page: u32, reviews_page: ReviewsPage) {
        self.pages
            .lock()
            .unwrap()
            .insert((movie_id.to_string(), page), reviews_page);
    }

    pub(crate) fn fail_with(&self, error: ClientError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub(crate) fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub(crate) fn last_query(&self) -> Option<ReviewQuery> {
        *self.last_query.lock().unwrap()
    }

    fn failure(&self) -> Option<ClientError> {
        self.failure.lock().unwrap().clone()
    }
}

pub(crate) fn reviews_page(
    movie_id: &str,
    reviews: Vec<Review>,
    summary: Option<(&str, SentimentCounts)>,
    pagination: Pagination,
) -> ReviewsPage {
    ReviewsPage {
        movie: summary.map(|(text, counts)| MovieRecord {
            id: Some("m1".to_string()),
            imdb_id: movie_id.to_string(),
            review_summary: text.to_string(),
            sentiment_counts: counts,
        }),
        reviews,
        pagination: Some(pagination),
    }
}

#[async_trait]
impl ReviewBackend for FakeBackend {
    async fn list_reviews(&self, movie_id: &str, query: ReviewQuery) -> Result<ReviewsPage, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query);
        if let Some(error) = self.failure() {
            return Err(error);
        }
        Ok(self
            .pages
            .lock()
            .unwrap()
            .get(&(movie_id.to_string(), query.page()))
            .cloned()
            .unwrap_or(ReviewsPage {
                movie: None,
                reviews: Vec::new(),
                pagination: Some(pagination(query.page(), query.limit(), 0)),
            }))
    }

    async fn create_review(&self, movie_id: &str, review: &NewReview) -> Result<Review, ClientError> {
        if let Some(error) = self.failure() {
            return Err(error);
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let mut created = self::review(&format!("new{}", id), movie_id, review.rating);
        created.text = review.text.clone();
        created.name = review.name.clone();
        created.email = review.email.clone();
        Ok(created)
    }

    async fn delete_review(&self, review_id: &str) -> Result<(), ClientError> {
        if let Some(error) = self.failure() {
            return Err(error);
        }
        self.deleted.lock().unwrap().push(review_id.to_string());
        Ok(())
    }

    async fn patch_movie_summary(
        &self,
        movie_id: &str,
        summary: &str,
        sentiment_counts: SentimentCounts,
    ) -> Result<MovieRecord, ClientError> {
        if let Some(error) = self.failure() {
            return Err(error);
        }
        Ok(MovieRecord {
            id: Some("m1".to_string()),
            imdb_id: movie_id.to_string(),
            review_summary: summary.to_string(),
            sentiment_counts,
        })
    }
}
