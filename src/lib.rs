pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod middleware;
pub mod repositories;
pub mod services;

pub use config::Settings;
pub use db::DbClient;
