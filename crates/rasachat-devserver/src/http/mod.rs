//! HTTP server for the dev server.
//!
//! Provides endpoints for:
//! - REST channel webhook (`/webhooks/rest/webhook`)
//! - Liveness banner (`/`)

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use rasachat_core::WEBHOOK_PATH;

use crate::state::AppState;

mod handlers;

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    // Browser widgets post from file:// or another port
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(WEBHOOK_PATH, post(handlers::webhook))
        .route("/", get(handlers::banner))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
