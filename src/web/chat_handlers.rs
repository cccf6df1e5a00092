//! Web chat endpoints used by the browser widget.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

use super::ApiError;
use crate::bot;
use crate::shared::models::{ChatReply, ChatRequest};
use crate::shared::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api", get(status))
        .route("/api/chat", post(send_message))
}

async fn status() -> &'static str {
    "chatrelay server is running."
}

async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    if request.message.is_empty() {
        return Err(ApiError::EmptyMessage);
    }

    let reply = bot::respond(&state, &request.message).await;
    Ok(Json(ChatReply { reply }))
}
