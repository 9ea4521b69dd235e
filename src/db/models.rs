use scylla::FromRow;

use crate::domain::{Article, Comment};

// Database row model for the articles table. Scylla returns empty
// collections as null, hence the options. `upvote_ids` is a set<text>, so
// the upvote count is its size.
#[derive(Debug, Clone, FromRow)]
pub struct ArticleRow {
    pub name: String,
    pub upvote_ids: Option<Vec<String>>,
    pub comments: Option<Vec<String>>,
}

impl ArticleRow {
    pub fn to_article(self) -> Result<Article, String> {
        let comments = self
            .comments
            .unwrap_or_default()
            .into_iter()
            .map(|raw| decode_comment(&raw))
            .collect::<Result<Vec<_>, _>>()?;

        let upvote_ids = self.upvote_ids.unwrap_or_default();

        Ok(Article {
            name: self.name,
            upvotes: upvote_ids.len() as i64,
            upvote_ids,
            comments,
        })
    }
}

/// Comments are stored as one JSON document per list element.
pub fn encode_comment(comment: &Comment) -> Result<String, String> {
    serde_json::to_string(comment).map_err(|e| format!("Failed to serialize comment: {}", e))
}

pub fn decode_comment(raw: &str) -> Result<Comment, String> {
    serde_json::from_str(raw).map_err(|e| format!("Failed to deserialize comment: {}", e))
}
