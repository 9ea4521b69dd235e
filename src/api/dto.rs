use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Article;

// Request DTOs
#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub text: String,
}

// Response DTOs

/// An article as seen by a particular caller. `canUpvote` is derived per
/// request and never stored.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    #[serde(flatten)]
    pub article: Article,
    pub can_upvote: bool,
}

impl ArticleResponse {
    pub fn for_caller(article: Article, uid: Option<&str>) -> Self {
        let can_upvote = article.can_upvote(uid);
        ArticleResponse {
            article,
            can_upvote,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}
