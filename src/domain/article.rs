use serde::{Deserialize, Serialize};

/// An article document. Articles are seeded out-of-band; this service only
/// mutates the upvote fields and the comment list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub name: String,
    /// Number of distinct upvoters. Always `upvote_ids.len()`: it is derived
    /// when an article is loaded and never written on its own.
    #[serde(default)]
    pub upvotes: i64,
    /// Users who upvoted, each at most once.
    #[serde(default)]
    pub upvote_ids: Vec<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub posted_by: String,
    pub text: String,
}

impl Article {
    pub fn new(name: impl Into<String>) -> Self {
        Article {
            name: name.into(),
            upvotes: 0,
            upvote_ids: Vec::new(),
            comments: Vec::new(),
        }
    }

    pub fn has_upvoted(&self, uid: &str) -> bool {
        self.upvote_ids.iter().any(|id| id == uid)
    }

    /// A caller may upvote when they are identified and have not upvoted yet.
    pub fn can_upvote(&self, uid: Option<&str>) -> bool {
        uid.is_some_and(|uid| !self.has_upvoted(uid))
    }

    /// Add `uid` to the upvoters. Returns `false` if it was already there.
    pub fn add_upvoter(&mut self, uid: &str) -> bool {
        if self.has_upvoted(uid) {
            return false;
        }
        self.upvote_ids.push(uid.to_string());
        self.upvotes = self.upvote_ids.len() as i64;
        true
    }
}
