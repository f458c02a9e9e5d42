//! Both stores behind one handle, plus the flows that span them.

use cinesearch_models::{MovieReviewAggregate, NewReview, Review, ReviewsPage};
use cinesearch_sources::{ClientError, MovieProvider, ReviewBackend, DEFAULT_REVIEW_LIMIT};
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;
use crate::movies::{DetailsOutcome, MoviesStore};
use crate::reviews::ReviewsStore;
use crate::validation::{validate_review, ValidationErrors};

/// Why a review submission did not go through
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Invalid(#[from] ValidationErrors),
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Result of opening a movie: both halves settle independently
#[derive(Debug)]
pub struct OpenMovie {
    pub details: Result<DetailsOutcome, ClientError>,
    pub reviews: Result<ReviewsPage, ClientError>,
}

#[derive(Debug, Default)]
pub struct AppStore {
    pub movies: MoviesStore,
    pub reviews: ReviewsStore,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_review_aggregates(aggregates: HashMap<String, MovieReviewAggregate>) -> Self {
        Self {
            movies: MoviesStore::new(),
            reviews: ReviewsStore::with_aggregates(aggregates),
        }
    }

    /// Fetch details and the first page of reviews concurrently
    pub async fn open_movie(
        &self,
        provider: &dyn MovieProvider,
        backend: &dyn ReviewBackend,
        imdb_id: &str,
    ) -> OpenMovie {
        let (details, reviews) = futures::join!(
            self.movies.fetch_details(provider, imdb_id),
            self.reviews
                .fetch_movie_reviews(backend, imdb_id, 1, DEFAULT_REVIEW_LIMIT),
        );
        OpenMovie { details, reviews }
    }

    pub async fn close_movie(&self) {
        self.movies.clear_movie_details().await;
    }

    /// Validate, submit, then refresh page 1 for the server's summary.
    ///
    /// A failed refresh is left in the reviews store's error; the review itself was stored.
    pub async fn submit_review(
        &self,
        backend: &dyn ReviewBackend,
        imdb_id: &str,
        draft: &NewReview,
    ) -> Result<Review, SubmitError> {
        let review = validate_review(draft)?;
        let created = self.reviews.add_review(backend, imdb_id, &review).await?;

        if let Err(e) = self.reviews.refresh_summary(backend, imdb_id).await {
            warn!("Review {} stored but summary refresh failed: {}", created.id, e);
        }

        Ok(created)
    }
}
