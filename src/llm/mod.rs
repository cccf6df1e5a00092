use async_trait::async_trait;
use log::error;
use thiserror::Error;

pub mod gemini;
pub mod prompt;

/// Reply served whenever the completion API cannot produce one.
pub const FALLBACK_REPLY: &str =
    "Sorry, I was unable to process your request right now. Please try again in a moment.";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("completion API error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Like [`generate`](Self::generate), but absorbs every failure into the
    /// fixed fallback string. Callers get a reply either way.
    async fn generate_reply(&self, prompt: &str) -> String {
        match self.generate(prompt).await {
            Ok(text) => text,
            Err(e) => {
                error!("LLM request failed: {}", e);
                FALLBACK_REPLY.to_string()
            }
        }
    }
}
