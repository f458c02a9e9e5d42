pub mod traits;
pub mod factory;
pub mod omdb;
pub mod reviews;
pub mod error;

pub use traits::{MovieProvider, ReviewBackend, ReviewQuery, DEFAULT_REVIEW_LIMIT, DEFAULT_REVIEW_PAGE, MAX_REVIEW_LIMIT};
pub use factory::{build_clients, Clients};
pub use error::{ClientError, ErrorKind};
pub use omdb::OmdbClient;
pub use reviews::ReviewsClient;
