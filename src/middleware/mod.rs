pub mod auth;

pub use auth::{AUTH_TOKEN_HEADER, AuthenticatedUser, auth_middleware, require_user};
