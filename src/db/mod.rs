pub mod client;
pub mod models;
pub mod queries;

pub use client::{DbClient, DbError};
pub use models::*;
