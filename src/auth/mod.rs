pub mod firebase;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use firebase::FirebaseVerifier;

/// Identity resolved from a request's `authtoken`. The default value is the
/// empty claims object attached to anonymous requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    pub uid: Option<String>,
    pub email: Option<String>,
}

impl UserClaims {
    pub fn new(uid: impl Into<String>, email: Option<String>) -> Self {
        Self {
            uid: Some(uid.into()),
            email,
        }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Token header has no key id")]
    MissingKeyId,

    #[error("Token signed with unknown key '{0}'")]
    UnknownKeyId(String),

    #[error("Invalid token claims: {0}")]
    InvalidClaims(String),

    #[error("Failed to fetch signing keys: {0}")]
    KeyFetch(#[from] reqwest::Error),

    #[error("Invalid credentials: {0}")]
    Credentials(String),
}

/// Turns an opaque bearer token into user claims.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<UserClaims, AuthError>;
}
