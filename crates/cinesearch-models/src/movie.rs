use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder OMDb uses for any field it has no value for
pub const NOT_AVAILABLE: &str = "N/A";

/// Returns false for empty strings and the provider's "N/A" placeholder
pub fn is_available(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed != NOT_AVAILABLE
}

fn deserialize_available<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|v| is_available(v)))
}

/// One entry of a search result list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String, // Ranges like "2001–2003" are possible, so kept as text
    #[serde(rename = "Type", default)]
    pub media_type: Option<String>,
    #[serde(rename = "Poster", default, deserialize_with = "deserialize_available")]
    pub poster: Option<String>,
}

/// What a search request yields and what the search cache stores per key
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchResults {
    pub movies: Vec<MovieSummary>,
    pub total_results: u32,
}

/// A single page of results for a query, as held by the search cache
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultPage {
    pub query: String,
    pub page: u32,
    pub movies: Vec<MovieSummary>,
    pub total_results: u32,
}

impl SearchResultPage {
    pub fn new(query: impl Into<String>, page: u32, results: SearchResults) -> Self {
        Self {
            query: query.into(),
            page,
            movies: results.movies,
            total_results: results.total_results,
        }
    }

    pub fn to_results(&self) -> SearchResults {
        SearchResults {
            movies: self.movies.clone(),
            total_results: self.total_results,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExternalRating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// Full record returned by a details lookup. Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct MovieDetails {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    pub title: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub rated: String,
    #[serde(default)]
    pub released: String,
    #[serde(default)]
    pub runtime: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub writer: String,
    #[serde(default)]
    pub actors: String,
    #[serde(default)]
    pub plot: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub awards: String,
    #[serde(default, deserialize_with = "deserialize_available")]
    pub poster: Option<String>,
    #[serde(default)]
    pub ratings: Vec<ExternalRating>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: String,
    #[serde(rename = "imdbVotes", default)]
    pub imdb_votes: String,
    #[serde(rename = "Type", default)]
    pub media_type: String,
    #[serde(default)]
    pub box_office: String,
}

impl MovieDetails {
    /// Genre list, split from the provider's comma-separated field
    pub fn genres(&self) -> Vec<&str> {
        split_list(&self.genre)
    }

    pub fn cast(&self) -> Vec<&str> {
        split_list(&self.actors)
    }

    /// IMDb rating if the provider has one
    pub fn imdb_rating(&self) -> Option<&str> {
        is_available(&self.imdb_rating).then_some(self.imdb_rating.as_str())
    }
}

fn split_list(value: &str) -> Vec<&str> {
    if !is_available(value) {
        return Vec::new();
    }
    value.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
}
