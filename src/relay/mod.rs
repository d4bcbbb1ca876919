// Relay server
//
// Stateless HTTP shim between browser/CLI clients and the AI gateway.
// One request in, one upstream call, one JSON result out.

mod error;
mod handlers;
mod middleware;
pub mod translate;

pub use error::{
    RelayError, CREDITS_EXHAUSTED_MESSAGE, NO_STRUCTURED_RESULT_MESSAGE, RATE_LIMITED_MESSAGE,
    UNKNOWN_ERROR_MESSAGE, UPSTREAM_FAILURE_MESSAGE,
};
pub use handlers::{handle_not_found, handle_relay, health_check};
pub use middleware::{cors_middleware, ALLOWED_HEADERS};

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::agent::{compose_user_message, Action, RelayRequest};
use crate::config::ServerConfig;
use crate::providers::{ChatProvider, ChatRequest};
use translate::{extract_tool_result, map_upstream_error};

/// The relay logic, independent of HTTP
#[derive(Clone)]
pub struct Relay {
    provider: Arc<dyn ChatProvider>,
}

impl Relay {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    /// Model the upstream provider is configured with
    pub fn model(&self) -> &str {
        self.provider.default_model()
    }

    /// Upstream request for an action: its system prompt, the composed user
    /// message and the action's tool, forced.
    pub fn build_request(action: Action, request: &RelayRequest) -> ChatRequest {
        let user_message = compose_user_message(action, request);
        ChatRequest::new(action.system_prompt(), user_message).with_forced_tool(action.tool())
    }

    /// Validate the action, call the model once and return its structured payload
    pub async fn handle(&self, request: &RelayRequest) -> Result<Value, RelayError> {
        let action: Action = request.action.parse()?;
        let chat_request = Self::build_request(action, request);

        tracing::info!(
            action = %action,
            provider = self.provider.name(),
            message_len = chat_request.user_message().map(str::len).unwrap_or(0),
            "Relaying request"
        );

        let response = self
            .provider
            .complete(&chat_request)
            .await
            .map_err(map_upstream_error)?;

        extract_tool_result(&response)
    }
}

/// Main relay server structure
pub struct RelayServer {
    relay: Relay,
    config: ServerConfig,
}

impl RelayServer {
    pub fn new(config: ServerConfig, provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            relay: Relay::new(provider),
            config,
        }
    }

    pub fn relay(&self) -> &Relay {
        &self.relay
    }

    /// Start the HTTP server
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.config.bind_address))?;

        let app = create_router(Arc::new(self)).layer(TraceLayer::new_for_http());

        tracing::info!("Starting po-agent relay on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Routes and CORS, without tracing (tests drive this directly).
///
/// Body size is not limited: long feedback pastes are forwarded as they are.
pub fn create_router(server: Arc<RelayServer>) -> Router {
    Router::new()
        .route("/", post(handle_relay))
        .route("/po-agent", post(handle_relay))
        .route("/health", get(health_check))
        .fallback(handle_not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(axum::middleware::from_fn(cors_middleware))
        .with_state(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::FeatureRef;
    use crate::providers::{ChatResponse, UpstreamError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records what it was asked and answers with a canned reply
    struct RecordingProvider {
        reply: serde_json::Value,
        seen: Mutex<Vec<ChatRequest>>,
    }

    #[async_trait]
    impl ChatProvider for RecordingProvider {
        async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, UpstreamError> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(serde_json::from_value(self.reply.clone()).unwrap())
        }
        fn name(&self) -> &str {
            "recording"
        }
        fn default_model(&self) -> &str {
            "test-model"
        }
    }

    fn tool_reply(arguments: serde_json::Value) -> serde_json::Value {
        json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": { "name": "x", "arguments": arguments.to_string() }
                    }]
                }
            }]
        })
    }

    #[tokio::test]
    async fn test_prioritize_sends_numbered_names_only() {
        let provider = Arc::new(RecordingProvider {
            reply: tool_reply(json!({ "features": [] })),
            seen: Mutex::new(Vec::new()),
        });
        let relay = Relay::new(provider.clone());

        let request = RelayRequest {
            action: "prioritize-features".to_string(),
            features: Some(vec![FeatureRef::new("Export PDF"), FeatureRef::new("Slack")]),
            ..Default::default()
        };
        let result = relay.handle(&request).await.unwrap();
        assert_eq!(result, json!({ "features": [] }));

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let sent = &seen[0];
        assert_eq!(sent.messages[0].content, Action::PrioritizeFeatures.system_prompt());
        assert_eq!(
            sent.user_message(),
            Some("Voici les features à prioriser :\n1. Export PDF\n2. Slack")
        );
        assert_eq!(sent.tools.len(), 1);
        assert_eq!(
            sent.tool_choice.as_ref().unwrap().function.name,
            "prioritize_features"
        );
    }

    #[tokio::test]
    async fn test_unknown_action_never_calls_upstream() {
        let provider = Arc::new(RecordingProvider {
            reply: json!({}),
            seen: Mutex::new(Vec::new()),
        });
        let relay = Relay::new(provider.clone());

        let request = RelayRequest {
            action: "delete-everything".to_string(),
            ..Default::default()
        };
        let err = relay.handle(&request).await.unwrap_err();
        assert!(matches!(err, RelayError::UnknownAction(_)));
        assert!(provider.seen.lock().unwrap().is_empty());
    }
}
