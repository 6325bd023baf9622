//! Coalición content management server
//!
//! REST JSON API over PostgreSQL for the publications, news, multimedia,
//! events, electoral guides, fact-checking verifiers and categories of an
//! electoral transparency coalition, plus local file uploads.

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
