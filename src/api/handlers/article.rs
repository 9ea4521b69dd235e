use axum::{
    Extension, Json,
    extract::{Path, State},
};
use std::sync::Arc;

use crate::api::{
    dto::{AddCommentRequest, ArticleResponse},
    error::ApiError,
};
use crate::auth::UserClaims;
use crate::domain::Article;
use crate::middleware::AuthenticatedUser;
use crate::services::ArticleService;

pub async fn get_article(
    State(service): State<Arc<ArticleService>>,
    Extension(claims): Extension<UserClaims>,
    Path(name): Path<String>,
) -> Result<Json<ArticleResponse>, ApiError> {
    let article = service.get_article(&name).await?;

    Ok(Json(ArticleResponse::for_caller(
        article,
        claims.uid.as_deref(),
    )))
}

pub async fn upvote_article(
    State(service): State<Arc<ArticleService>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(name): Path<String>,
) -> Result<Json<Article>, ApiError> {
    let article = service.upvote_article(&name, &user.uid).await?;

    Ok(Json(article))
}

pub async fn add_comment(
    State(service): State<Arc<ArticleService>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(name): Path<String>,
    Json(payload): Json<AddCommentRequest>,
) -> Result<Json<Article>, ApiError> {
    let posted_by = user.email.ok_or_else(|| {
        ApiError::BadRequest("Commenting requires an account with an email address".to_string())
    })?;

    let article = service.add_comment(&name, posted_by, payload.text).await?;

    Ok(Json(article))
}
