use async_trait::async_trait;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::{LlmError, LlmProvider};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiContent>,
    #[serde(default, rename = "finishReason")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            base_url: base_url
                .unwrap_or_else(|| "https://generativelanguage.googleapis.com".to_string()),
        }
    }

    fn build_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn build_request(prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        }
    }

    fn extract_text(response: &GeminiResponse) -> Result<String, LlmError> {
        let candidate = response.candidates.first().ok_or_else(|| {
            LlmError::MalformedResponse("no candidates in response".to_string())
        })?;
        let content = candidate.content.as_ref().ok_or_else(|| {
            LlmError::MalformedResponse("candidate carries no content".to_string())
        })?;
        Ok(content
            .parts
            .iter()
            .map(|part| part.text.as_str())
            .collect::<Vec<_>>()
            .join(""))
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = self.build_url();
        let request = Self::build_request(prompt);

        info!("Gemini request: model={}", self.model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini API error ({}): {}", status, body);
            return Err(LlmError::Api { status, body });
        }

        let result: GeminiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;
        Self::extract_text(&result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::FALLBACK_REPLY;

    #[test]
    fn build_url_includes_model() {
        let client = GeminiClient::new("key".to_string(), "gemini-1.5-pro-latest".to_string(), None);
        assert_eq!(
            client.build_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro-latest:generateContent"
        );
    }

    #[test]
    fn request_serialization() {
        let request = GeminiClient::build_request("hello");
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"contents\""));
        assert!(json.contains("\"role\":\"user\""));
        assert!(json.contains("\"text\":\"hello\""));
    }

    #[test]
    fn response_text_extraction() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "Hello "}, {"text": "there!"}]
                },
                "finishReason": "STOP"
            }]
        }"#;

        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(GeminiClient::extract_text(&response).unwrap(), "Hello there!");
    }

    #[test]
    fn empty_candidates_is_an_error() {
        let response: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(GeminiClient::extract_text(&response).is_err());
    }

    #[tokio::test]
    async fn generate_returns_completion_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/test-model:generateContent")
            .match_query(mockito::Matcher::UrlEncoded("key".into(), "secret".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"pong"}]}}]}"#,
            )
            .create_async()
            .await;

        let client =
            GeminiClient::new("secret".to_string(), "test-model".to_string(), Some(server.url()));
        let text = client.generate("ping").await.unwrap();
        assert_eq!(text, "pong");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn generate_surfaces_api_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/test-model:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(429)
            .with_body(r#"{"error":{"message":"quota exceeded"}}"#)
            .create_async()
            .await;

        let client =
            GeminiClient::new("secret".to_string(), "test-model".to_string(), Some(server.url()));
        match client.generate("ping").await {
            Err(LlmError::Api { status, .. }) => assert_eq!(status.as_u16(), 429),
            other => panic!("expected Api error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn generate_reply_falls_back_when_upstream_is_down() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/test-model:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client =
            GeminiClient::new("secret".to_string(), "test-model".to_string(), Some(server.url()));
        assert_eq!(client.generate_reply("ping").await, FALLBACK_REPLY);
    }
}
