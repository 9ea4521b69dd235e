use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::db::DbError;
use crate::domain::{Article, Comment};

use super::ArticleStore;

/// In-process article store. Each write holds the lock for the whole
/// check-and-apply, matching the atomicity of the Scylla writes.
#[derive(Default)]
pub struct MemoryArticleStore {
    articles: RwLock<HashMap<String, Article>>,
}

impl MemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_articles(articles: impl IntoIterator<Item = Article>) -> Self {
        let articles = articles
            .into_iter()
            .map(|article| (article.name.clone(), article))
            .collect();

        Self {
            articles: RwLock::new(articles),
        }
    }
}

#[async_trait]
impl ArticleStore for MemoryArticleStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Article>, DbError> {
        Ok(self.articles.read().await.get(name).cloned())
    }

    async fn add_upvote(&self, name: &str, uid: &str) -> Result<(), DbError> {
        if let Some(article) = self.articles.write().await.get_mut(name) {
            article.add_upvoter(uid);
        }
        Ok(())
    }

    async fn append_comment(&self, name: &str, comment: &Comment) -> Result<bool, DbError> {
        let mut articles = self.articles.write().await;
        match articles.get_mut(name) {
            Some(article) => {
                article.comments.push(comment.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
