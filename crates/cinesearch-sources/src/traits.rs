use async_trait::async_trait;
use cinesearch_models::{MovieDetails, MovieRecord, NewReview, Review, ReviewsPage, SearchResults, SentimentCounts};
use crate::error::ClientError;

/// Read access to the movie metadata provider
#[async_trait]
pub trait MovieProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    /// One page of title search results
    async fn search(&self, query: &str, page: u32) -> Result<SearchResults, ClientError>;

    /// Full details for a single identifier
    async fn details(&self, imdb_id: &str) -> Result<MovieDetails, ClientError>;
}

/// Access to the review storage service
#[async_trait]
pub trait ReviewBackend: Send + Sync {
    async fn list_reviews(&self, movie_id: &str, query: ReviewQuery) -> Result<ReviewsPage, ClientError>;

    /// Returns the stored review with its server-assigned id and timestamp
    async fn create_review(&self, movie_id: &str, review: &NewReview) -> Result<Review, ClientError>;

    async fn delete_review(&self, review_id: &str) -> Result<(), ClientError>;

    /// Used by the summarization process, not by the regular review flow
    async fn patch_movie_summary(
        &self,
        movie_id: &str,
        summary: &str,
        sentiment_counts: SentimentCounts,
    ) -> Result<MovieRecord, ClientError>;
}

pub const DEFAULT_REVIEW_PAGE: u32 = 1;
pub const DEFAULT_REVIEW_LIMIT: u32 = 10;
pub const MAX_REVIEW_LIMIT: u32 = 100;

/// Page/limit pair for listing reviews. Both are at least 1; limit is capped at 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewQuery {
    page: u32,
    limit: u32,
}

impl ReviewQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_REVIEW_LIMIT),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl Default for ReviewQuery {
    fn default() -> Self {
        Self::new(DEFAULT_REVIEW_PAGE, DEFAULT_REVIEW_LIMIT)
    }
}
