// Action dispatch
//
// Each relay action pairs a system prompt with exactly one function tool.
// The model is forced to answer through that tool, so the reply is a single
// JSON payload shaped by the tool's parameter schema.

pub mod compose;
pub mod prompts;
pub mod tools;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::providers::types::ToolDefinition;

pub use compose::{compose_user_message, FeatureRef, RelayRequest};

/// The closed set of things the relay knows how to ask the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    AnalyzeFeedback,
    GenerateStories,
    PrioritizeFeatures,
}

/// Raised when an action name arrives over the wire that matches no variant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown action: {0}")]
pub struct UnknownAction(pub String);

impl Action {
    pub const ALL: [Action; 3] = [
        Action::AnalyzeFeedback,
        Action::GenerateStories,
        Action::PrioritizeFeatures,
    ];

    /// Wire name, as sent in the `action` field of a relay request
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::AnalyzeFeedback => "analyze-feedback",
            Action::GenerateStories => "generate-stories",
            Action::PrioritizeFeatures => "prioritize-features",
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            Action::AnalyzeFeedback => prompts::ANALYZE_FEEDBACK,
            Action::GenerateStories => prompts::GENERATE_STORIES,
            Action::PrioritizeFeatures => prompts::PRIORITIZE_FEATURES,
        }
    }

    /// Name of the single function tool the model must call
    pub fn tool_name(&self) -> &'static str {
        match self {
            Action::AnalyzeFeedback => tools::ANALYZE_FEEDBACK_TOOL,
            Action::GenerateStories => tools::GENERATE_STORIES_TOOL,
            Action::PrioritizeFeatures => tools::PRIORITIZE_FEATURES_TOOL,
        }
    }

    pub fn tool(&self) -> ToolDefinition {
        match self {
            Action::AnalyzeFeedback => tools::analyze_feedback(),
            Action::GenerateStories => tools::generate_user_stories(),
            Action::PrioritizeFeatures => tools::prioritize_features(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_actions() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>(), Ok(action));
        }
    }

    #[test]
    fn test_parse_unknown_action() {
        let err = "summarize".parse::<Action>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown action: summarize");
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Analyze-Feedback".parse::<Action>().is_err());
    }

    #[test]
    fn test_tool_names_match_definitions() {
        for action in Action::ALL {
            assert_eq!(action.tool().name, action.tool_name());
        }
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&Action::PrioritizeFeatures).unwrap();
        assert_eq!(json, "\"prioritize-features\"");
    }
}
