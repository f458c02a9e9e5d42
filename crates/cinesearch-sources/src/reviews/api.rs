use cinesearch_models::{MovieRecord, NewReview, Review, ReviewsPage, SentimentCounts};
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::debug;
use urlencoding::encode;
use crate::error::ClientError;
use crate::traits::ReviewQuery;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryUpdate<'a> {
    review_summary: &'a str,
    sentiment_counts: SentimentCounts,
}

fn base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// Map a non-success status to a network error that keeps the status and body
async fn ensure_success(response: Response, action: &str) -> Result<Response, ClientError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let error_text = response.text().await.unwrap_or_default();
    Err(ClientError::network(format!("Failed to {}: {} - {}", action, status, error_text)))
}

/// `GET /movies/{id}/reviews?page&limit`
pub async fn list_reviews(
    client: &Client,
    base_url: &str,
    movie_id: &str,
    query: ReviewQuery,
) -> Result<ReviewsPage, ClientError> {
    let url = format!("{}/movies/{}/reviews", base(base_url), encode(movie_id));
    debug!("Fetching reviews for {} (page {}, limit {})", movie_id, query.page(), query.limit());

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .query(&[("page", query.page()), ("limit", query.limit())])
        .send()
        .await
        .map_err(|e| ClientError::network(format!("Failed to fetch reviews: {}", e)))?;

    let response = ensure_success(response, "fetch reviews").await?;
    Ok(response.json().await?)
}

/// `POST /movies/{id}/reviews`
pub async fn create_review(
    client: &Client,
    base_url: &str,
    movie_id: &str,
    review: &NewReview,
) -> Result<Review, ClientError> {
    let url = format!("{}/movies/{}/reviews", base(base_url), encode(movie_id));

    let response = client
        .post(&url)
        .header("Accept", "application/json")
        .json(review)
        .send()
        .await
        .map_err(|e| ClientError::network(format!("Failed to add review: {}", e)))?;

    let response = ensure_success(response, "add review").await?;
    Ok(response.json().await?)
}

/// `DELETE /reviews/{id}`
pub async fn delete_review(client: &Client, base_url: &str, review_id: &str) -> Result<(), ClientError> {
    let url = format!("{}/reviews/{}", base(base_url), encode(review_id));

    let response = client
        .delete(&url)
        .send()
        .await
        .map_err(|e| ClientError::network(format!("Failed to delete review: {}", e)))?;

    ensure_success(response, "delete review").await?;
    Ok(())
}

/// `PATCH /movies/{id}/summary` with `{reviewSummary, sentimentCounts}`
pub async fn update_movie_summary(
    client: &Client,
    base_url: &str,
    movie_id: &str,
    summary: &str,
    sentiment_counts: SentimentCounts,
) -> Result<MovieRecord, ClientError> {
    let url = format!("{}/movies/{}/summary", base(base_url), encode(movie_id));
    let body = SummaryUpdate {
        review_summary: summary,
        sentiment_counts,
    };

    let response = client
        .patch(&url)
        .header("Accept", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(|e| ClientError::network(format!("Failed to update movie summary: {}", e)))?;

    let response = ensure_success(response, "update movie summary").await?;
    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_update_wire_format() {
        let body = SummaryUpdate {
            review_summary: "Loved it",
            sentiment_counts: SentimentCounts::new(3, 1, 0),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "reviewSummary": "Loved it",
                "sentimentCounts": {"good": 3, "average": 1, "bad": 0}
            })
        );
    }

    #[test]
    fn test_base_trims_trailing_slash() {
        assert_eq!(base("http://localhost:3001/"), "http://localhost:3001");
    }
}
