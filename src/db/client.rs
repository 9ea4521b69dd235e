use scylla::{Session, SessionBuilder};
use std::sync::Arc;
use thiserror::Error;

use crate::config::ScyllaConfig;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database connection error: {0}")]
    ConnectionError(#[from] scylla::transport::errors::NewSessionError),

    #[error("Query error: {0}")]
    QueryError(#[from] scylla::transport::errors::QueryError),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Not found")]
    NotFound,

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

#[derive(Clone)]
pub struct DbClient {
    session: Arc<Session>,
    keyspace: String,
}

impl DbClient {
    pub async fn new(config: &ScyllaConfig) -> Result<Self, DbError> {
        tracing::info!("Initializing Scylla session with nodes {:?}", config.nodes);
        let mut builder = SessionBuilder::new().known_nodes(&config.nodes);
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.user(username, password);
        }
        let session = builder.build().await?;

        session.use_keyspace(&config.keyspace, false).await?;
        tracing::info!("Keyspace '{}' selected", config.keyspace);

        Ok(DbClient {
            session: Arc::new(session),
            keyspace: config.keyspace.clone(),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn keyspace(&self) -> &str {
        &self.keyspace
    }
}
