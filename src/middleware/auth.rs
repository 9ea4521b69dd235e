use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::api::ApiError;
use crate::auth::{IdentityVerifier, UserClaims};

/// Header carrying the bearer token.
pub const AUTH_TOKEN_HEADER: &str = "authtoken";

/// Identity of a caller that passed [`require_user`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub uid: String,
    pub email: Option<String>,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: &UserClaims) -> Option<Self> {
        claims.uid.as_ref().map(|uid| AuthenticatedUser {
            uid: uid.clone(),
            email: claims.email.clone(),
        })
    }
}

/// Resolve the caller's identity from the `authtoken` header.
///
/// Requests without a token continue with empty claims. A token that fails
/// verification ends the request with 400.
pub async fn auth_middleware(
    State(verifier): State<Arc<dyn IdentityVerifier>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(AUTH_TOKEN_HEADER)
        .map(|value| {
            value.to_str().map(str::to_owned).map_err(|_| {
                tracing::warn!("Rejecting authtoken header with non-ASCII bytes");
                ApiError::InvalidToken
            })
        })
        .transpose()?;

    let claims = match token {
        None => UserClaims::default(),
        Some(token) => verifier.verify(&token).await.map_err(|e| {
            tracing::warn!("Token verification failed: {}", e);
            ApiError::InvalidToken
        })?,
    };

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Reject callers whose claims carry no `uid`.
pub async fn require_user(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<UserClaims>()
        .and_then(AuthenticatedUser::from_claims)
        .ok_or(ApiError::Unauthorized)?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
