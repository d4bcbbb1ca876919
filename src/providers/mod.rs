// Model invocation
//
// The relay talks to a single OpenAI-compatible chat-completion endpoint.
// The trait is the seam the relay is written against, so tests and other
// gateways can stand in for the HTTP implementation.

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

pub mod gateway;
pub mod types;

pub use gateway::GatewayProvider;
pub use types::{ChatRequest, ChatResponse, ToolDefinition};

/// Failure of one upstream call
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The gateway answered with a non-2xx status
    #[error("AI gateway returned {status}")]
    Status { status: StatusCode, body: String },

    /// The request never got a response (DNS, TLS, connection reset...)
    #[error("Failed to reach AI gateway: {0}")]
    Transport(String),

    /// 2xx response whose body is not a chat completion
    #[error("Failed to parse AI gateway response: {0}")]
    Decode(String),
}

/// Trait for chat-completion providers
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send exactly one request and wait for the complete response.
    ///
    /// Implementations must not retry: a failure is reported to the caller as is.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, UpstreamError>;

    /// Provider name for logs
    fn name(&self) -> &str;

    /// Model used when the request leaves `model` empty
    fn default_model(&self) -> &str;
}
