pub mod movie;
pub mod review;
pub mod sentiment;
pub mod pagination;
pub mod aggregate;
mod serde_helpers;

pub use movie::{is_available, ExternalRating, MovieDetails, MovieSummary, SearchResultPage, SearchResults};
pub use review::{NewReview, Review};
pub use sentiment::{Sentiment, SentimentCounts};
pub use pagination::{MovieRecord, Pagination, ReviewsPage};
pub use aggregate::MovieReviewAggregate;
