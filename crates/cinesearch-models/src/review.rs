use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::sentiment::Sentiment;
use crate::serde_helpers::null_as_default;

/// A stored review as returned by the reviews backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    #[serde(default)]
    pub movie_id: Option<String>, // Backend's internal movie document id
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
}

impl Review {
    /// Name to show next to the review, falling back to email, then "Anonymous"
    pub fn author(&self) -> &str {
        if !self.name.trim().is_empty() {
            &self.name
        } else if !self.email.trim().is_empty() {
            &self.email
        } else {
            "Anonymous"
        }
    }
}

/// Payload for submitting a review
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewReview {
    pub rating: u8,
    pub text: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_from_backend_document() {
        let review: Review = serde_json::from_str(
            r#"{"id":"65f0c1","movieId":"65f0aa","imdbID":"tt0133093","rating":5,"text":"great",
                "name":"A","email":"","createdAt":"2024-03-12T10:15:30.123456Z","sentiment":"good"}"#,
        )
        .unwrap();
        assert_eq!(review.rating, 5);
        assert_eq!(review.sentiment, Some(Sentiment::Good));
        assert_eq!(review.author(), "A");
    }

    #[test]
    fn test_review_null_fields_default() {
        let review: Review = serde_json::from_str(
            r#"{"id":"1","imdbID":"tt1","rating":null,"text":null,"createdAt":"2024-03-12T10:15:30Z"}"#,
        )
        .unwrap();
        assert_eq!(review.rating, 0);
        assert_eq!(review.text, "");
        assert_eq!(review.author(), "Anonymous");
        assert_eq!(review.sentiment, None);
    }
}
