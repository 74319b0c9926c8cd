//! Bookshelf server
//!
//! REST JSON API for managing book and member records. Postgres holds the
//! canonical rows; Meilisearch holds an eventually-consistent copy used only
//! for keyword search.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
