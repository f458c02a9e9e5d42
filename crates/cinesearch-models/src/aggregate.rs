use serde::{Deserialize, Serialize};
use crate::pagination::Pagination;
use crate::review::Review;
use crate::sentiment::SentimentCounts;

/// Everything the client holds about one movie's reviews
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieReviewAggregate {
    pub movie_id: String,
    pub reviews: Vec<Review>, // Newest first after a local insert
    pub review_summary: String,
    pub sentiment_counts: SentimentCounts,
    pub pagination: Option<Pagination>,
}

impl MovieReviewAggregate {
    pub fn new(movie_id: impl Into<String>) -> Self {
        Self {
            movie_id: movie_id.into(),
            reviews: Vec::new(),
            review_summary: String::new(),
            sentiment_counts: SentimentCounts::default(),
            pagination: None,
        }
    }

    /// Mean star rating of the reviews held locally, 0.0 when there are none
    pub fn average_rating(&self) -> f64 {
        if self.reviews.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.reviews.iter().map(|r| r.rating as u32).sum();
        sum as f64 / self.reviews.len() as f64
    }

    pub fn contains(&self, review_id: &str) -> bool {
        self.reviews.iter().any(|r| r.id == review_id)
    }

    pub fn has_more(&self) -> bool {
        self.pagination.map(|p| p.has_more).unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn review(id: &str, rating: u8) -> Review {
        Review {
            id: id.to_string(),
            movie_id: None,
            imdb_id: "tt0133093".to_string(),
            rating,
            text: "text".to_string(),
            name: "A".to_string(),
            email: String::new(),
            created_at: Utc::now(),
            sentiment: None,
        }
    }

    #[test]
    fn test_average_rating() {
        let mut aggregate = MovieReviewAggregate::new("tt0133093");
        assert_eq!(aggregate.average_rating(), 0.0);
        aggregate.reviews = vec![review("1", 5), review("2", 2)];
        assert_eq!(aggregate.average_rating(), 3.5);
        assert!(aggregate.contains("2"));
        assert!(!aggregate.has_more());
    }
}
