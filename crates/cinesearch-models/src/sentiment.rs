use serde::{Deserialize, Serialize};

/// Sentiment the summarization process assigns to a single review
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Good,
    Average,
    Bad,
}

/// Tally of review sentiments for one movie
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentimentCounts {
    #[serde(default)]
    pub good: u32,
    #[serde(default)]
    pub average: u32,
    #[serde(default)]
    pub bad: u32,
}

impl SentimentCounts {
    pub fn new(good: u32, average: u32, bad: u32) -> Self {
        Self { good, average, bad }
    }

    pub fn total(&self) -> u32 {
        self.good + self.average + self.bad
    }
}
