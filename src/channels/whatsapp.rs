//! WhatsApp Business channel integration.
//!
//! Webhook handling and message relay for the WhatsApp Business API:
//! - Subscription verification handshake (`hub.*` query parameters)
//! - Inbound notification parsing with an explicit text/ignored/malformed split
//! - Outbound text delivery via Meta's Graph API
//!
//! The platform retries undelivered notifications aggressively, so the POST
//! handler acknowledges with 200 unconditionally; processing failures are
//! logged and dropped.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::bot;
use crate::shared::state::AppState;

pub const GRAPH_API_VERSION: &str = "v17.0";

#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    pub hub_mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub hub_verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub hub_challenge: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct NotificationPayload {
    #[serde(default)]
    pub entry: Vec<NotificationEntry>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct NotificationEntry {
    #[serde(default)]
    pub changes: Vec<NotificationChange>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct NotificationChange {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub value: ChangeValue,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChangeValue {
    #[serde(default)]
    pub messages: Option<Vec<IncomingMessage>>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub msg_type: String,
    #[serde(default)]
    pub text: Option<TextBody>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TextBody {
    pub body: String,
}

/// A text message extracted from a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessage {
    pub from: String,
    pub id: Option<String>,
    pub body: String,
}

/// Outcome of parsing one notification body. Anything that is not a text
/// message (delivery receipts, status updates, media) is `Ignored`; a body
/// that is not a notification at all is `Malformed`. Both still get a 200
/// acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    Text(TextMessage),
    Ignored,
    Malformed,
}

pub fn parse_notification(body: &[u8]) -> WebhookEvent {
    let payload: NotificationPayload = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(_) => return WebhookEvent::Malformed,
    };

    for entry in &payload.entry {
        for change in &entry.changes {
            if change.field.as_deref().unwrap_or("messages") != "messages" {
                continue;
            }
            if let Some(messages) = &change.value.messages {
                if let Some(message) = messages.first() {
                    if message.msg_type == "text" {
                        if let Some(text) = &message.text {
                            return WebhookEvent::Text(TextMessage {
                                from: message.from.clone(),
                                id: message.id.clone(),
                                body: text.body.clone(),
                            });
                        }
                    }
                    return WebhookEvent::Ignored;
                }
            }
        }
    }

    WebhookEvent::Ignored
}

#[derive(Debug, Error)]
pub enum SendError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("WhatsApp API error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
}

pub struct WhatsAppSender {
    client: reqwest::Client,
    access_token: String,
    phone_number_id: String,
    base_url: String,
}

impl WhatsAppSender {
    pub fn new(access_token: String, phone_number_id: String, base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token,
            phone_number_id,
            base_url: base_url.unwrap_or_else(|| "https://graph.facebook.com".to_string()),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/{}/{}/messages",
            self.base_url.trim_end_matches('/'),
            GRAPH_API_VERSION,
            self.phone_number_id
        )
    }

    pub async fn send_text(&self, to: &str, body: &str) -> Result<(), SendError> {
        let payload = json!({
            "messaging_product": "whatsapp",
            "to": to,
            "type": "text",
            "text": {
                "body": body
            }
        });

        let response = self
            .client
            .post(self.messages_url())
            .bearer_auth(&self.access_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SendError::Api { status, body });
        }

        Ok(())
    }

    /// Best effort; callers log and move on when this fails.
    pub async fn mark_as_read(&self, message_id: &str) -> Result<(), SendError> {
        let payload = json!({
            "messaging_product": "whatsapp",
            "status": "read",
            "message_id": message_id
        });

        let response = self
            .client
            .post(self.messages_url())
            .bearer_auth(&self.access_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SendError::Api { status, body });
        }

        Ok(())
    }
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/whatsapp", get(verify_webhook).post(receive_notification))
}

async fn verify_webhook(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VerifyParams>,
) -> (StatusCode, String) {
    if let (Some(mode), Some(token), Some(challenge)) = (
        &params.hub_mode,
        &params.hub_verify_token,
        &params.hub_challenge,
    ) {
        if mode == "subscribe" && token == &state.config.whatsapp.verify_token {
            info!("WhatsApp webhook verified successfully");
            return (StatusCode::OK, challenge.clone());
        }
    }

    warn!("WhatsApp webhook verification failed");
    (StatusCode::FORBIDDEN, "Forbidden".to_string())
}

async fn receive_notification(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> (StatusCode, &'static str) {
    match parse_notification(&body) {
        WebhookEvent::Text(message) => {
            process_text_message(&state, &message).await;
        }
        WebhookEvent::Ignored => {}
        WebhookEvent::Malformed => {
            warn!("discarding malformed WhatsApp notification payload");
        }
    }

    (StatusCode::OK, "OK")
}

async fn process_text_message(state: &AppState, message: &TextMessage) {
    if let Some(id) = &message.id {
        if let Err(e) = state.whatsapp.mark_as_read(id).await {
            warn!("failed to mark WhatsApp message {} as read: {}", id, e);
        }
    }

    let reply = bot::respond(state, &message.body).await;
    if let Err(e) = state.whatsapp.send_text(&message.from, &reply).await {
        error!("failed to deliver WhatsApp reply to {}: {}", message.from, e);
    }
}
