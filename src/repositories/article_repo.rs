use async_trait::async_trait;
use scylla::IntoTypedRows;
use std::collections::HashSet;
use scylla::QueryResult;
use scylla::frame::response::result::CqlValue;
use scylla::query::Query;

use crate::db::{ArticleRow, DbClient, DbError, encode_comment};
use crate::domain::{Article, Comment};

use super::ArticleStore;

/// Scylla-backed article store. Upvotes are set insertions; the comment
/// append is a lightweight transaction so it never creates a row.
#[derive(Clone)]
pub struct ArticleRepository {
    client: DbClient,
}

impl ArticleRepository {
    pub fn new(client: DbClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ArticleStore for ArticleRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Article>, DbError> {
        let query = Query::new(crate::db::queries::SELECT_ARTICLE);

        let result = self.client.session().query(query, (name,)).await?;

        let Some(row) = result.rows.unwrap_or_default().into_typed::<ArticleRow>().next() else {
            return Ok(None);
        };

        let row =
            row.map_err(|e| DbError::InvalidData(format!("Failed to parse article row: {}", e)))?;
        row.to_article().map(Some).map_err(DbError::InvalidData)
    }

    async fn add_upvote(&self, name: &str, uid: &str) -> Result<(), DbError> {
        let query = Query::new(crate::db::queries::ADD_ARTICLE_UPVOTE);
        let ids = HashSet::from([uid.to_string()]);

        self.client.session().query(query, (ids, name)).await?;

        Ok(())
    }

    async fn append_comment(&self, name: &str, comment: &Comment) -> Result<bool, DbError> {
        let encoded = encode_comment(comment).map_err(DbError::SerializationError)?;
        let query = Query::new(crate::db::queries::APPEND_ARTICLE_COMMENT);

        let result = self
            .client
            .session()
            .query(query, (vec![encoded], name))
            .await?;

        lwt_applied(&result)
    }
}

/// Conditional statements answer with an `[applied]` boolean as the first column.
fn lwt_applied(result: &QueryResult) -> Result<bool, DbError> {
    result
        .rows
        .as_ref()
        .and_then(|rows| rows.first())
        .and_then(|row| row.columns.first())
        .and_then(|column| column.as_ref())
        .and_then(CqlValue::as_boolean)
        .ok_or_else(|| {
            DbError::InvalidData("Conditional update returned no [applied] column".to_string())
        })
}
