// User message composition
//
// Pure functions: the relay never validates length or emptiness, an empty
// submission is forwarded as an empty message.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Action;

/// Placeholder name for an absent or null `action`
pub const MISSING_ACTION: &str = "undefined";

/// Body of a relay call, as posted by the client.
///
/// `action` stays a plain string here so an unknown name can be reported
/// with a 400 instead of failing deserialization. Any JSON value is accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayRequest {
    #[serde(default = "missing_action", deserialize_with = "lenient_action")]
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<FeatureRef>>,
}

/// A feature as sent for prioritization: only the name reaches the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRef {
    pub name: String,
}

impl FeatureRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

fn missing_action() -> String {
    MISSING_ACTION.to_string()
}

fn lenient_action<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(action) => action,
        Value::Null => missing_action(),
        other => other.to_string(),
    })
}

pub fn compose_user_message(action: Action, request: &RelayRequest) -> String {
    let content = request.content.as_deref().unwrap_or_default();

    match action {
        Action::AnalyzeFeedback => content.to_string(),
        Action::GenerateStories => match request.persona.as_deref() {
            Some(persona) if !persona.is_empty() => story_message(persona, content),
            _ => content.to_string(),
        },
        Action::PrioritizeFeatures => match &request.features {
            Some(features) => feature_list_message(features),
            None => content.to_string(),
        },
    }
}

fn story_message(persona: &str, content: &str) -> String {
    format!(
        "Persona principal : {persona}\n\nFeature à découper en user stories :\n{content}"
    )
}

fn feature_list_message(features: &[FeatureRef]) -> String {
    let lines: Vec<String> = features
        .iter()
        .enumerate()
        .map(|(i, feature)| format!("{}. {}", i + 1, feature.name))
        .collect();
    format!("Voici les features à prioriser :\n{}", lines.join("\n"))
}
