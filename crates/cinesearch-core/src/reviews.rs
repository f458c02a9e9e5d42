//! Per-movie review cache store.

use cinesearch_models::{MovieReviewAggregate, NewReview, Pagination, Review, ReviewsPage, SentimentCounts};
use cinesearch_sources::{ClientError, ReviewBackend, ReviewQuery};
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use crate::status::LoadStatus;

/// Page size used when re-fetching after a submission
pub const SUMMARY_REFRESH_LIMIT: u32 = 10;

const REVIEWS_ERROR_FALLBACK: &str = "Something went wrong";

#[derive(Debug, Clone, Default)]
pub struct ReviewsState {
    pub by_movie_id: HashMap<String, MovieReviewAggregate>,
    /// Shared by every movie and operation
    pub status: LoadStatus,
    pub error: Option<String>,
}

impl ReviewsState {
    pub fn pending(&mut self) {
        self.status = LoadStatus::Loading;
    }

    pub fn rejected(&mut self, message: &str) {
        self.status = LoadStatus::Failed;
        self.error = Some(if message.trim().is_empty() {
            REVIEWS_ERROR_FALLBACK.to_string()
        } else {
            message.to_string()
        });
    }

    fn settled(&mut self) {
        self.status = LoadStatus::Succeeded;
        self.error = None;
    }

    fn entry(&mut self, movie_id: &str) -> &mut MovieReviewAggregate {
        self.by_movie_id
            .entry(movie_id.to_string())
            .or_insert_with(|| MovieReviewAggregate::new(movie_id))
    }

    pub fn fetch_fulfilled(&mut self, movie_id: &str, page: u32, response: ReviewsPage) {
        self.settled();
        let aggregate = self.entry(movie_id);

        if page <= 1 {
            aggregate.reviews = response.reviews;
        } else {
            let held: HashSet<String> = aggregate.reviews.iter().map(|r| r.id.clone()).collect();
            aggregate
                .reviews
                .extend(response.reviews.into_iter().filter(|r| !held.contains(&r.id)));
        }

        if let Some(movie) = response.movie {
            aggregate.review_summary = movie.review_summary;
            aggregate.sentiment_counts = movie.sentiment_counts;
        }

        aggregate.pagination = response.pagination;
    }

    /// New review goes first; summary and counts wait for the server
    pub fn add_fulfilled(&mut self, movie_id: &str, review: Review) {
        self.settled();
        let aggregate = self.entry(movie_id);
        aggregate.reviews.insert(0, review);
        if let Some(pagination) = aggregate.pagination.as_mut() {
            pagination.total_reviews += 1;
        }
    }

    pub fn delete_fulfilled(&mut self, movie_id: &str, review_id: &str) {
        self.settled();
        let Some(aggregate) = self.by_movie_id.get_mut(movie_id) else {
            return;
        };

        aggregate.reviews.retain(|r| r.id != review_id);
        if let Some(pagination) = aggregate.pagination.as_mut() {
            pagination.total_reviews = pagination.total_reviews.saturating_sub(1);
        }

        if aggregate.reviews.is_empty() {
            self.by_movie_id.remove(movie_id);
        }
    }

    /// Drop one movie's aggregate, or all of them
    pub fn clear(&mut self, movie_id: Option<&str>) {
        match movie_id {
            Some(id) => {
                self.by_movie_id.remove(id);
            }
            None => self.by_movie_id.clear(),
        }
    }

    pub fn reviews_for(&self, movie_id: &str) -> &[Review] {
        self.by_movie_id
            .get(movie_id)
            .map(|a| a.reviews.as_slice())
            .unwrap_or(&[])
    }

    pub fn average_rating(&self, movie_id: &str) -> f64 {
        self.by_movie_id
            .get(movie_id)
            .map(|a| a.average_rating())
            .unwrap_or(0.0)
    }

    pub fn review_summary(&self, movie_id: &str) -> &str {
        self.by_movie_id
            .get(movie_id)
            .map(|a| a.review_summary.as_str())
            .unwrap_or("")
    }

    pub fn sentiment_counts(&self, movie_id: &str) -> SentimentCounts {
        self.by_movie_id
            .get(movie_id)
            .map(|a| a.sentiment_counts)
            .unwrap_or_default()
    }

    pub fn pagination(&self, movie_id: &str) -> Option<Pagination> {
        self.by_movie_id.get(movie_id).and_then(|a| a.pagination)
    }

    pub fn has_more_reviews(&self, movie_id: &str) -> bool {
        self.by_movie_id
            .get(movie_id)
            .map(|a| a.has_more())
            .unwrap_or(false)
    }
}

/// Async front of [`ReviewsState`]
#[derive(Debug, Default)]
pub struct ReviewsStore {
    state: RwLock<ReviewsState>,
}

impl ReviewsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a previously saved set of aggregates
    pub fn with_aggregates(by_movie_id: HashMap<String, MovieReviewAggregate>) -> Self {
        Self {
            state: RwLock::new(ReviewsState {
                by_movie_id,
                ..ReviewsState::default()
            }),
        }
    }

    pub async fn fetch_movie_reviews(
        &self,
        backend: &dyn ReviewBackend,
        movie_id: &str,
        page: u32,
        limit: u32,
    ) -> Result<ReviewsPage, ClientError> {
        let query = ReviewQuery::new(page, limit);
        self.state.write().await.pending();

        match backend.list_reviews(movie_id, query).await {
            Ok(response) => {
                info!(
                    "Fetched {} reviews for {} (page {})",
                    response.reviews.len(),
                    movie_id,
                    query.page()
                );
                self.state
                    .write()
                    .await
                    .fetch_fulfilled(movie_id, query.page(), response.clone());
                Ok(response)
            }
            Err(e) => {
                warn!("Fetching reviews for {} failed: {}", movie_id, e);
                self.state.write().await.rejected(&e.to_string());
                Err(e)
            }
        }
    }

    /// Next page for a movie whose cursor says there is more. `None` otherwise.
    pub async fn load_more_reviews(
        &self,
        backend: &dyn ReviewBackend,
        movie_id: &str,
    ) -> Result<Option<ReviewsPage>, ClientError> {
        let next = {
            let state = self.state.read().await;
            match state.pagination(movie_id) {
                Some(p) if p.has_more && !state.status.is_loading() => Some((p.page + 1, p.limit)),
                _ => None,
            }
        };

        match next {
            Some((page, limit)) => self
                .fetch_movie_reviews(backend, movie_id, page, limit)
                .await
                .map(Some),
            None => {
                debug!("No more reviews to load for {}", movie_id);
                Ok(None)
            }
        }
    }

    /// Submit a review. Returns the created review exactly as the backend stored it.
    pub async fn add_review(
        &self,
        backend: &dyn ReviewBackend,
        movie_id: &str,
        review: &NewReview,
    ) -> Result<Review, ClientError> {
        self.state.write().await.pending();

        match backend.create_review(movie_id, review).await {
            Ok(created) => {
                info!("Added review {} to {}", created.id, movie_id);
                self.state.write().await.add_fulfilled(movie_id, created.clone());
                Ok(created)
            }
            Err(e) => {
                warn!("Adding review to {} failed: {}", movie_id, e);
                self.state.write().await.rejected(&e.to_string());
                Err(e)
            }
        }
    }

    /// Re-read page 1 so summary, counts and pagination reflect the server
    pub async fn refresh_summary(
        &self,
        backend: &dyn ReviewBackend,
        movie_id: &str,
    ) -> Result<ReviewsPage, ClientError> {
        self.fetch_movie_reviews(backend, movie_id, 1, SUMMARY_REFRESH_LIMIT).await
    }

    pub async fn delete_review(
        &self,
        backend: &dyn ReviewBackend,
        review_id: &str,
        movie_id: &str,
    ) -> Result<(), ClientError> {
        self.state.write().await.pending();

        match backend.delete_review(review_id).await {
            Ok(()) => {
                info!("Deleted review {} from {}", review_id, movie_id);
                self.state.write().await.delete_fulfilled(movie_id, review_id);
                Ok(())
            }
            Err(e) => {
                warn!("Deleting review {} failed: {}", review_id, e);
                self.state.write().await.rejected(&e.to_string());
                Err(e)
            }
        }
    }

    pub async fn clear_reviews(&self, movie_id: Option<&str>) {
        self.state.write().await.clear(movie_id);
    }

    pub async fn reviews_for(&self, movie_id: &str) -> Vec<Review> {
        self.state.read().await.reviews_for(movie_id).to_vec()
    }

    pub async fn average_rating(&self, movie_id: &str) -> f64 {
        self.state.read().await.average_rating(movie_id)
    }

    pub async fn review_summary(&self, movie_id: &str) -> String {
        self.state.read().await.review_summary(movie_id).to_string()
    }

    pub async fn sentiment_counts(&self, movie_id: &str) -> SentimentCounts {
        self.state.read().await.sentiment_counts(movie_id)
    }

    pub async fn aggregate(&self, movie_id: &str) -> Option<MovieReviewAggregate> {
        self.state.read().await.by_movie_id.get(movie_id).cloned()
    }

    pub async fn pagination(&self, movie_id: &str) -> Option<Pagination> {
        self.state.read().await.pagination(movie_id)
    }

    pub async fn has_more_reviews(&self, movie_id: &str) -> bool {
        self.state.read().await.has_more_reviews(movie_id)
    }

    pub async fn status(&self) -> LoadStatus {
        self.state.read().await.status
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// Every aggregate currently held, for persisting
    pub async fn aggregates(&self) -> HashMap<String, MovieReviewAggregate> {
        self.state.read().await.by_movie_id.clone()
    }
}
