use cinesearch_models::MovieReviewAggregate;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Fixed key the review snapshot is stored under
pub const REVIEWS_KEY: &str = "cinesearch_reviews";

/// Best-effort local snapshot of review aggregates, keyed by movie id.
///
/// Reads never fail: a missing or unreadable entry is an empty map. Writes
/// never fail either; problems are logged and dropped.
#[derive(Debug, Clone)]
pub struct LocalReviewStore {
    path: PathBuf,
}

impl LocalReviewStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(format!("{}.json", REVIEWS_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> HashMap<String, MovieReviewAggregate> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!("No review snapshot at {}: {}", self.path.display(), e);
                return HashMap::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(reviews) => reviews,
            Err(e) => {
                warn!("Ignoring unreadable review snapshot {}: {}", self.path.display(), e);
                HashMap::new()
            }
        }
    }

    pub fn save(&self, reviews: &HashMap<String, MovieReviewAggregate>) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("Failed to create snapshot directory {}: {}", parent.display(), e);
                return;
            }
        }

        let json = match serde_json::to_string(reviews) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize review snapshot: {}", e);
                return;
            }
        };

        match std::fs::write(&self.path, json) {
            Ok(()) => debug!("Review snapshot saved ({} movies)", reviews.len()),
            Err(e) => warn!("Failed to write review snapshot {}: {}", self.path.display(), e),
        }
    }

    /// Remove the snapshot; returns whether one existed
    pub fn clear(&self) -> bool {
        std::fs::remove_file(&self.path).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use cinesearch_models::Review;

    fn aggregate() -> MovieReviewAggregate {
        let mut aggregate = MovieReviewAggregate::new("tt0133093");
        aggregate.reviews.push(Review {
            id: "r1".to_string(),
            movie_id: None,
            imdb_id: "tt0133093".to_string(),
            rating: 4,
            text: "solid".to_string(),
            name: "B".to_string(),
            email: String::new(),
            created_at: Utc::now(),
            sentiment: None,
        });
        aggregate
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalReviewStore::new(dir.path());

        let mut reviews = HashMap::new();
        reviews.insert("tt0133093".to_string(), aggregate());
        store.save(&reviews);

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded["tt0133093"].reviews[0].id, "r1");
        assert!(store.path().ends_with("cinesearch_reviews.json"));
    }

    #[test]
    fn test_missing_or_corrupt_snapshot_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalReviewStore::new(dir.path());
        assert!(store.load().is_empty());

        std::fs::write(store.path(), "{not json").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_to_unwritable_location_is_ignored() {
        let file = tempfile::NamedTempFile::new().unwrap();
        // A regular file used as the data directory cannot hold the snapshot
        let store = LocalReviewStore::new(file.path());
        store.save(&HashMap::new());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalReviewStore::new(dir.path());
        assert!(!store.clear());
        store.save(&HashMap::new());
        assert!(store.clear());
    }
}
