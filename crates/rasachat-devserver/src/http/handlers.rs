//! HTTP request handlers.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use tracing::info;

use rasachat_core::{BotReply, WebhookRequest};

use crate::state::AppState;

/// Same banner shape a Rasa server returns at its root.
pub async fn banner() -> impl IntoResponse {
    "Hello from Rasa devserver"
}

/// REST channel webhook: one text reply per message.
pub async fn webhook(
    State(state): State<Arc<AppState>>,
    Json(request): Json<WebhookRequest>,
) -> impl IntoResponse {
    let reply = state.knowledge.respond(&request.message);
    info!(sender = %request.sender, chars = request.message.chars().count(), "Webhook message");
    Json(vec![BotReply::text(request.sender, reply)])
}
