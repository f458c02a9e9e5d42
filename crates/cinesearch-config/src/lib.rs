pub mod config;
pub mod credentials;
pub mod local_store;
pub mod paths;

pub use config::{Config, LoggingConfig, OmdbConfig, ReviewsConfig, DEFAULT_OMDB_BASE_URL, DEFAULT_REVIEWS_BASE_URL};
pub use credentials::CredentialStore;
pub use local_store::{LocalReviewStore, REVIEWS_KEY};
pub use paths::{PathManager, base_path_override};
