use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::extract::{ArticleOutcome, ArticleStats};

#[derive(Deserialize)]
pub struct ArticleRequest {
    pub url: String,
}

#[derive(Serialize)]
pub struct ArticleResponse {
    pub url: String,
    pub title: String,
    pub content: String,
    pub images: Vec<String>,
    pub stats: ArticleStats,
    pub fetched_at: DateTime<Utc>,
}

impl ArticleResponse {
    pub fn from_outcome(url: String, outcome: ArticleOutcome) -> Self {
        ArticleResponse {
            url,
            title: outcome.title,
            content: outcome.content,
            images: outcome.images,
            stats: outcome.stats,
            fetched_at: Utc::now(),
        }
    }
}
