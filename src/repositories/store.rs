use async_trait::async_trait;

use crate::db::DbError;
use crate::domain::{Article, Comment};

/// Access to the `articles` collection.
///
/// Every mutating call is a single atomic write against the backing store;
/// callers never observe half of an upvote.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<Article>, DbError>;

    /// Add `uid` to the article's upvoters. Adding an id that is already
    /// present changes nothing, so concurrent upvoters never conflict.
    /// Callers check that the article exists first.
    async fn add_upvote(&self, name: &str, uid: &str) -> Result<(), DbError>;

    /// Append a comment to an existing article. Returns `false` when no
    /// article matched, in which case nothing is written.
    async fn append_comment(&self, name: &str, comment: &Comment) -> Result<bool, DbError>;
}
