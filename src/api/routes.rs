use axum::{
    Router,
    extract::Request,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use crate::auth::IdentityVerifier;
use crate::middleware::{auth_middleware, require_user};
use crate::services::ArticleService;

use super::handlers;

#[derive(Clone)]
pub struct AppState {
    pub article_service: Arc<ArticleService>,
    pub verifier: Arc<dyn IdentityVerifier>,
    pub static_dir: PathBuf,
}

pub fn create_router(state: AppState) -> Router {
    // Guarded routes; the public article read is registered outside this group.
    let guarded = Router::new()
        .route("/articles/{name}/upvote", put(handlers::upvote_article))
        .route("/articles/{name}/comments", post(handlers::add_comment))
        .route_layer(middleware::from_fn(require_user));

    let api = Router::new()
        .route("/health", get(health_check))
        .route("/articles/{name}", get(handlers::get_article))
        .merge(guarded)
        .fallback(|| async { StatusCode::NOT_FOUND })
        .layer(middleware::from_fn_with_state(
            state.verifier.clone(),
            auth_middleware,
        ))
        .with_state(state.article_service.clone());

    // Everything outside /api is the single-page app; unknown paths get the
    // shell so client-side routing can take over.
    let index = state.static_dir.join("index.html");
    let app = ServeDir::new(&state.static_dir).fallback(ServeFile::new(index));

    Router::new()
        .nest("/api", api)
        .fallback(move |req: Request| serve_app(app.clone(), req))
}

/// Any path starting with `/api`, segment boundary or not, is never the app
/// shell.
async fn serve_app(app: ServeDir<ServeFile>, req: Request) -> Response {
    if req.uri().path().starts_with("/api") {
        return StatusCode::NOT_FOUND.into_response();
    }

    match app.oneshot(req).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

async fn health_check() -> axum::Json<crate::api::dto::HealthResponse> {
    axum::Json(crate::api::dto::HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now(),
    })
}
