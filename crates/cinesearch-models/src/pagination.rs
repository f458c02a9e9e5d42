use serde::{Deserialize, Serialize};
use crate::review::Review;
use crate::sentiment::SentimentCounts;
use crate::serde_helpers::null_as_default;

/// Pagination cursor returned alongside a page of reviews
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total_reviews: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub has_more: bool,
}

/// The backend's per-movie document (no embedded reviews)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub review_summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sentiment_counts: SentimentCounts,
}

/// Response of `GET /movies/{id}/reviews`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewsPage {
    #[serde(default)]
    pub movie: Option<MovieRecord>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reviews_page_with_null_summary() {
        let page: ReviewsPage = serde_json::from_str(
            r#"{"movie":{"id":"m1","imdbID":"tt0133093","reviewSummary":null,"sentimentCounts":{"good":2}},
                "reviews":[],
                "pagination":{"page":1,"limit":10,"totalReviews":0,"totalPages":0,"hasMore":false}}"#,
        )
        .unwrap();
        let movie = page.movie.unwrap();
        assert_eq!(movie.review_summary, "");
        assert_eq!(movie.sentiment_counts, SentimentCounts::new(2, 0, 0));
        assert!(!page.pagination.unwrap().has_more);
    }
}
