//! HTTP route handlers

pub mod auth;
pub mod health;
pub mod schedule;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::context::AppContext;

/// Build the application router.
pub fn create_router(context: Arc<AppContext>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/schedule", post(schedule::schedule))
        .route("/api/auth/google/url", get(auth::authorization_url))
        .route("/api/auth/google/callback", get(auth::oauth_callback))
        .with_state(context)
}
