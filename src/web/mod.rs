use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use log::error;
use std::sync::Arc;
use thiserror::Error;

use crate::shared::models::ErrorResponse;
use crate::shared::state::AppState;

pub mod chat_handlers;

pub fn routes() -> Router<Arc<AppState>> {
    chat_handlers::routes()
}

/// Errors surfaced by the HTTP layer. Internal detail stays in the server
/// log; clients get a generic message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no message received")]
    EmptyMessage,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::EmptyMessage => (StatusCode::BAD_REQUEST, "No message received".to_string()),
            ApiError::Internal(e) => {
                error!("internal error while handling request: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred while processing your request.".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
