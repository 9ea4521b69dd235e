use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::db::DbError;

#[derive(Debug)]
pub enum ApiError {
    Database(DbError),
    /// The `authtoken` header could not be verified. Answered with a bare 400.
    InvalidToken,
    /// A guarded route was reached without a resolved user. Bare 401.
    Unauthorized,
    /// The named article does not exist. Bare 404.
    NotFound,
    BadRequest(String),
    Internal(String),
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => ApiError::NotFound,
            DbError::InvalidData(msg) | DbError::SerializationError(msg) => {
                ApiError::Internal(msg)
            }
            _ => ApiError::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidToken => return StatusCode::BAD_REQUEST.into_response(),
            ApiError::Unauthorized => return StatusCode::UNAUTHORIZED.into_response(),
            ApiError::NotFound => return StatusCode::NOT_FOUND.into_response(),
            ApiError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Database error: {}", err),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
