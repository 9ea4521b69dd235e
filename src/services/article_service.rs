use std::sync::Arc;

use crate::db::DbError;
use crate::domain::{Article, Comment};
use crate::repositories::ArticleStore;

pub struct ArticleService {
    store: Arc<dyn ArticleStore>,
}

impl ArticleService {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self { store }
    }

    /// Get an article by name
    pub async fn get_article(&self, name: &str) -> Result<Article, DbError> {
        self.store
            .find_by_name(name)
            .await?
            .ok_or(DbError::NotFound)
    }

    /// Upvote an article on behalf of `uid`.
    ///
    /// A user who already upvoted gets the current article back unchanged.
    /// The write is a set insertion, so a racing duplicate from the same user
    /// is absorbed by the store and concurrent distinct upvoters never conflict.
    pub async fn upvote_article(&self, name: &str, uid: &str) -> Result<Article, DbError> {
        let article = self.get_article(name).await?;

        if !article.can_upvote(Some(uid)) {
            tracing::debug!("User {} already upvoted article '{}'", uid, name);
            return Ok(article);
        }

        self.store.add_upvote(name, uid).await?;
        tracing::info!("User {} upvoted article '{}'", uid, name);

        self.get_article(name).await
    }

    /// Append a comment and return the updated article.
    ///
    /// The append is not preceded by an existence check; a missing article
    /// simply matches nothing and the re-read reports it.
    pub async fn add_comment(
        &self,
        name: &str,
        posted_by: String,
        text: String,
    ) -> Result<Article, DbError> {
        let comment = Comment { posted_by, text };

        if !self.store.append_comment(name, &comment).await? {
            tracing::debug!("Comment for unknown article '{}' matched nothing", name);
        }

        self.get_article(name).await
    }
}
