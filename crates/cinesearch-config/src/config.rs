use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::credentials::CredentialStore;

pub const DEFAULT_OMDB_BASE_URL: &str = "https://www.omdbapi.com";
pub const DEFAULT_REVIEWS_BASE_URL: &str = "http://localhost:3001";

const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub reviews: ReviewsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Movie metadata provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbConfig {
    #[serde(default = "default_omdb_base_url")]
    pub base_url: String,
    /// Usually left unset here and kept in credentials.toml or `OMDB_API_KEY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Reviews backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewsConfig {
    #[serde(default = "default_reviews_base_url")]
    pub base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Unset means JSON only when stdout is not a terminal, decided per run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_omdb_base_url() -> String {
    DEFAULT_OMDB_BASE_URL.to_string()
}

fn default_reviews_base_url() -> String {
    DEFAULT_REVIEWS_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_omdb_base_url(),
            api_key: None,
        }
    }
}

impl Default for ReviewsConfig {
    fn default() -> Self {
        Self {
            base_url: default_reviews_base_url(),
            page_size: default_page_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: None,
            file: None,
        }
    }
}

fn is_usable_key(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && key != PLACEHOLDER_API_KEY
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Missing file means defaults; a malformed file is still an error
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `OMDB_API_KEY`, `OMDB_BASE_URL` and `SERVER_URL` from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Same as [`Config::apply_env_overrides`] with an injectable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("OMDB_API_KEY") {
            self.omdb.api_key = Some(key);
        }
        if let Some(url) = non_empty("OMDB_BASE_URL") {
            self.omdb.base_url = url;
        }
        if let Some(url) = non_empty("SERVER_URL") {
            self.reviews.base_url = url;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [("omdb.base_url", &self.omdb.base_url), ("reviews.base_url", &self.reviews.base_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow::anyhow!("{} must be an http(s) URL, got '{}'", name, url));
            }
        }

        if self.reviews.page_size == 0 || self.reviews.page_size > 100 {
            return Err(anyhow::anyhow!("reviews.page_size must be between 1 and 100"));
        }

        Ok(())
    }

    /// API key from config/environment first, then the credential store
    pub fn resolve_api_key(&self, credentials: &CredentialStore) -> Option<String> {
        self.omdb
            .api_key
            .as_deref()
            .filter(|k| is_usable_key(k))
            .or_else(|| credentials.get_omdb_api_key().map(String::as_str).filter(|k| is_usable_key(k)))
            .map(|k| k.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            omdb: OmdbConfig {
                base_url: "https://omdb.example.com".to_string(),
                api_key: None,
            },
            reviews: ReviewsConfig {
                base_url: "http://reviews.local:3001".to_string(),
                page_size: 20,
            },
            logging: LoggingConfig {
                level: "debug".to_string(),
                json: Some(false),
                file: None,
            },
        };

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.omdb.base_url, "https://omdb.example.com");
        assert_eq!(loaded.reviews.page_size, 20);
        assert_eq!(loaded.logging.level, "debug");
        assert!(loaded.omdb.api_key.is_none());
        assert_eq!(loaded.logging.json, Some(false));
    }

    #[test]
    fn test_default_config_leaves_json_logging_unset() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();
        Config::default().save_to_file(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("json"));
        assert_eq!(Config::load_from_file(&path).unwrap().logging.json, None);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[reviews]\nbase_url = \"http://x:1\"\n").unwrap();
        assert_eq!(config.omdb.base_url, DEFAULT_OMDB_BASE_URL);
        assert_eq!(config.reviews.base_url, "http://x:1");
        assert_eq!(config.reviews.page_size, 10);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.reviews.base_url, DEFAULT_REVIEWS_BASE_URL);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("OMDB_API_KEY", "k123"),
            ("SERVER_URL", "http://reviews:9000"),
            ("OMDB_BASE_URL", "  "),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.omdb.api_key.as_deref(), Some("k123"));
        assert_eq!(config.reviews.base_url, "http://reviews:9000");
        assert_eq!(config.omdb.base_url, DEFAULT_OMDB_BASE_URL);
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.reviews.page_size = 0;
        assert!(config.validate().is_err());

        config.reviews.page_size = 10;
        config.omdb.base_url = "ftp://nope".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolve_api_key() {
        let mut creds = CredentialStore::new(PathBuf::from("/tmp/unused"));
        let mut config = Config::default();
        assert_eq!(config.resolve_api_key(&creds), None);

        creds.set_omdb_api_key("from-creds".to_string());
        assert_eq!(config.resolve_api_key(&creds).as_deref(), Some("from-creds"));

        config.omdb.api_key = Some("YOUR_API_KEY".to_string());
        assert_eq!(config.resolve_api_key(&creds).as_deref(), Some("from-creds"));

        config.omdb.api_key = Some("from-config".to_string());
        assert_eq!(config.resolve_api_key(&creds).as_deref(), Some("from-config"));
    }
}
