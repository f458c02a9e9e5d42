use crate::error::ClientError;
use crate::omdb::client::create_http_client;
use crate::reviews::api;
use crate::traits::{ReviewBackend, ReviewQuery};
use async_trait::async_trait;
use cinesearch_models::{MovieRecord, NewReview, Review, ReviewsPage, SentimentCounts};
use reqwest::Client;
use std::sync::Arc;
use tracing::info;

/// HTTP client for the reviews backend
#[derive(Clone)]
pub struct ReviewsClient {
    client: Arc<Client>,
    base_url: String,
}

impl ReviewsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Arc::new(create_http_client()), base_url)
    }

    pub fn with_client(client: Arc<Client>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ReviewBackend for ReviewsClient {
    async fn list_reviews(&self, movie_id: &str, query: ReviewQuery) -> Result<ReviewsPage, ClientError> {
        api::list_reviews(&self.client, &self.base_url, movie_id, query).await
    }

    async fn create_review(&self, movie_id: &str, review: &NewReview) -> Result<Review, ClientError> {
        let created = api::create_review(&self.client, &self.base_url, movie_id, review).await?;
        info!("Created review {} for {}", created.id, movie_id);
        Ok(created)
    }

    async fn delete_review(&self, review_id: &str) -> Result<(), ClientError> {
        api::delete_review(&self.client, &self.base_url, review_id).await?;
        info!("Deleted review {}", review_id);
        Ok(())
    }

    async fn patch_movie_summary(
        &self,
        movie_id: &str,
        summary: &str,
        sentiment_counts: SentimentCounts,
    ) -> Result<MovieRecord, ClientError> {
        api::update_movie_summary(&self.client, &self.base_url, movie_id, summary, sentiment_counts).await
    }
}
