// Client library
//
// Typed wrappers around the relay's three actions. Every failure, whether
// reported by the relay or by the transport, surfaces as one `AgentError`
// carrying a message fit for display. No partial results.

pub mod types;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::agent::{Action, FeatureRef, RelayRequest};
use crate::relay::Relay;
pub use types::{
    Complexity, FeatureRequest, FeedbackAnalysis, Moscow, PrioritizedFeature, Priority,
    Sentiment, UserStory,
};
use types::{PrioritizedResult, StoriesResult};

/// Fallback when neither the relay nor the transport explains what went wrong
pub const COMMUNICATION_ERROR_MESSAGE: &str = "Erreur de communication avec l'agent";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AgentError {
    message: String,
}

impl AgentError {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self {
                message: COMMUNICATION_ERROR_MESSAGE.to_string(),
            }
        } else {
            Self { message }
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The three product-owner operations
///
/// Implemented over HTTP by [`AgentClient`] and in-process by [`LocalAgent`].
#[async_trait]
pub trait PoAgent: Send + Sync {
    /// Raw relay call: one action in, its JSON result out
    async fn call(&self, request: RelayRequest) -> Result<Value, AgentError>;

    async fn analyze_feedback(&self, content: &str) -> Result<FeedbackAnalysis, AgentError> {
        let request = RelayRequest {
            action: Action::AnalyzeFeedback.to_string(),
            content: Some(content.to_string()),
            ..Default::default()
        };
        decode(self.call(request).await?)
    }

    /// Stories come back without ids; they get their position ("1", "2", ...)
    async fn generate_stories(
        &self,
        content: &str,
        persona: &str,
    ) -> Result<Vec<UserStory>, AgentError> {
        let request = RelayRequest {
            action: Action::GenerateStories.to_string(),
            content: Some(content.to_string()),
            persona: Some(persona.to_string()),
            ..Default::default()
        };
        let result: StoriesResult = decode(self.call(request).await?)?;
        Ok(assign_story_ids(result.stories))
    }

    async fn prioritize_features(
        &self,
        names: &[String],
    ) -> Result<Vec<PrioritizedFeature>, AgentError> {
        let request = RelayRequest {
            action: Action::PrioritizeFeatures.to_string(),
            features: Some(names.iter().map(FeatureRef::new).collect()),
            ..Default::default()
        };
        let result: PrioritizedResult = decode(self.call(request).await?)?;
        Ok(result.features)
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, AgentError> {
    serde_json::from_value(value)
        .map_err(|e| AgentError::new(format!("Réponse inattendue de l'agent : {e}")))
}

pub fn assign_story_ids(stories: Vec<UserStory>) -> Vec<UserStory> {
    stories
        .into_iter()
        .enumerate()
        .map(|(i, story)| UserStory {
            id: (i + 1).to_string(),
            ..story
        })
        .collect()
}

/// Relay response body: exactly one of the two fields is expected
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for a running relay
#[derive(Clone)]
pub struct AgentClient {
    client: Client,
    relay_url: String,
}

impl AgentClient {
    pub fn new(relay_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            relay_url: relay_url.into(),
        })
    }
}

#[async_trait]
impl PoAgent for AgentClient {
    async fn call(&self, request: RelayRequest) -> Result<Value, AgentError> {
        tracing::debug!(action = %request.action, url = %self.relay_url, "Calling relay");

        let response = self
            .client
            .post(&self.relay_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Relay unreachable");
                AgentError::new(format!("{COMMUNICATION_ERROR_MESSAGE} : {e}"))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AgentError::new(format!("{COMMUNICATION_ERROR_MESSAGE} : {e}")))?;

        match serde_json::from_str::<Envelope>(&body) {
            Ok(Envelope {
                error: Some(message),
                ..
            }) => Err(AgentError::new(message)),
            Ok(Envelope {
                result: Some(result),
                ..
            }) if status.is_success() => Ok(result),
            _ => {
                tracing::warn!(status = status.as_u16(), "Unexpected relay response");
                Err(AgentError::new(format!(
                    "{COMMUNICATION_ERROR_MESSAGE} (HTTP {})",
                    status.as_u16()
                )))
            }
        }
    }
}

/// Runs the relay logic in-process, without an HTTP hop
#[derive(Clone)]
pub struct LocalAgent {
    relay: Relay,
}

impl LocalAgent {
    pub fn new(relay: Relay) -> Self {
        Self { relay }
    }
}

#[async_trait]
impl PoAgent for LocalAgent {
    async fn call(&self, request: RelayRequest) -> Result<Value, AgentError> {
        self.relay
            .handle(&request)
            .await
            .map_err(|e| AgentError::new(e.message()))
    }
}
