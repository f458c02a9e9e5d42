pub mod status;
pub mod movies;
pub mod reviews;
pub mod validation;
pub mod app;

#[cfg(test)]
pub(crate) mod test_support;

pub use status::LoadStatus;
pub use movies::{DetailsOutcome, MoviesState, MoviesStore, SearchKey, SearchOutcome, SEARCH_PAGE_SIZE};
pub use reviews::{ReviewsState, ReviewsStore, SUMMARY_REFRESH_LIMIT};
pub use validation::{validate_review, FieldError, ReviewField, ValidationErrors};
pub use app::{AppStore, OpenMovie, SubmitError};
