// AI gateway provider
//
// OpenAI-compatible chat completions over HTTPS with a bearer key.
// One call in, one response out: no retry, no caching, no deduplication.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::types::{ChatRequest, ChatResponse};
use super::{ChatProvider, UpstreamError};
use crate::config::GatewayConfig;

#[derive(Clone)]
pub struct GatewayProvider {
    client: Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl GatewayProvider {
    /// Create a provider for the given gateway.
    ///
    /// `timeout` is left to the caller; without one the call waits on the
    /// transport's own behaviour.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        default_model: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_model: default_model.into(),
        })
    }

    /// Build from configuration, failing fast when no API key is configured
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let api_key = config.require_api_key()?;
        Self::new(
            api_key,
            config.base_url.clone(),
            config.model.clone(),
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatProvider for GatewayProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, UpstreamError> {
        let mut request = request.clone();
        if request.model.is_empty() {
            request.model = self.default_model.clone();
        }

        tracing::debug!(
            model = %request.model,
            tools = request.tools.len(),
            "Sending request to AI gateway"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "AI gateway error");
            return Err(UpstreamError::Status { status, body });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        tracing::debug!(
            id = chat_response.id.as_deref().unwrap_or("-"),
            choices = chat_response.choices.len(),
            "Received response from AI gateway"
        );

        Ok(chat_response)
    }

    fn name(&self) -> &str {
        "ai-gateway"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::types::ToolDefinition;
    use reqwest::StatusCode;
    use serde_json::json;

    fn request() -> ChatRequest {
        ChatRequest::new("system", "user").with_forced_tool(ToolDefinition {
            name: "analyze_feedback".to_string(),
            description: "Return structured feedback analysis".to_string(),
            parameters: json!({ "type": "object" }),
        })
    }

    #[test]
    fn test_provider_creation() {
        let provider = GatewayProvider::new("test-key", "https://example.com/", "m", None);
        assert!(provider.is_ok());
        let provider = provider.unwrap();
        assert_eq!(provider.endpoint(), "https://example.com/v1/chat/completions");
        assert_eq!(provider.default_model(), "m");
    }

    #[tokio::test]
    async fn test_sends_bearer_key_and_default_model() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer secret")
            .match_body(mockito::Matcher::PartialJson(json!({
                "model": "google/gemini-3-flash-preview",
                "tool_choice": { "type": "function", "function": { "name": "analyze_feedback" } }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"gen-1","choices":[]}"#)
            .expect(1)
            .create_async()
            .await;

        let provider =
            GatewayProvider::new("secret", server.url(), "google/gemini-3-flash-preview", None)
                .unwrap();
        let response = provider.complete(&request()).await.unwrap();

        assert_eq!(response.id.as_deref(), Some("gen-1"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(503)
            .with_body("overloaded")
            .expect(1)
            .create_async()
            .await;

        let provider = GatewayProvider::new("k", server.url(), "m", None).unwrap();
        let err = provider.complete(&request()).await.unwrap_err();

        match err {
            UpstreamError::Status { status, body } => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(body, "overloaded");
            }
            other => panic!("expected status error, got {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let provider = GatewayProvider::new("k", server.url(), "m", None).unwrap();
        let err = provider.complete(&request()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Decode(_)));
    }
}
