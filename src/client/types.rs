// Result types returned by the relay
//
// Field names follow the tool schemas (camelCase on the wire). Numbers come
// straight from the model and are never range-checked.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Mixed,
}

impl Sentiment {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positif",
            Sentiment::Negative => "Négatif",
            Sentiment::Mixed => "Mixte",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Critique,
    Haute,
    Moyenne,
    Basse,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::Critique => "Critique",
            Priority::Haute => "Haute",
            Priority::Moyenne => "Moyenne",
            Priority::Basse => "Basse",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRequest {
    pub title: String,
    pub priority: Priority,
    pub mentions: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackAnalysis {
    pub summary: String,
    pub sentiment: Sentiment,
    pub patterns: Vec<String>,
    pub feature_requests: Vec<FeatureRequest>,
    pub pain_points: Vec<String>,
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    XS,
    S,
    M,
    L,
    XL,
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Complexity::XS => "XS",
            Complexity::S => "S",
            Complexity::M => "M",
            Complexity::L => "L",
            Complexity::XL => "XL",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStory {
    /// Position in the generated list ("1", "2", ...), assigned after receipt.
    /// Not stable across regenerations.
    #[serde(default)]
    pub id: String,
    pub role: String,
    pub action: String,
    pub benefit: String,
    pub acceptance_criteria: Vec<String>,
    pub complexity: Complexity,
    pub complexity_reason: String,
}

impl UserStory {
    /// Markdown block ready to paste into a backlog tool
    pub fn to_markdown(&self) -> String {
        let criteria: Vec<String> = self
            .acceptance_criteria
            .iter()
            .map(|c| format!("- {c}"))
            .collect();
        format!(
            "**En tant que** {}\n**Je veux** {}\n**Afin de** {}\n\n**Critères d'acceptation :**\n{}\n\n**Complexité :** {} — {}",
            self.role,
            self.action,
            self.benefit,
            criteria.join("\n"),
            self.complexity,
            self.complexity_reason
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Moscow {
    Must,
    Should,
    Could,
    Wont,
}

impl Moscow {
    /// Display order, most to least important
    pub const ORDER: [Moscow; 4] = [Moscow::Must, Moscow::Should, Moscow::Could, Moscow::Wont];

    pub fn label(&self) -> &'static str {
        match self {
            Moscow::Must => "Must Have",
            Moscow::Should => "Should Have",
            Moscow::Could => "Could Have",
            Moscow::Wont => "Won't Have",
        }
    }
}

impl std::str::FromStr for Moscow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "must" => Ok(Moscow::Must),
            "should" => Ok(Moscow::Should),
            "could" => Ok(Moscow::Could),
            "wont" | "won't" => Ok(Moscow::Wont),
            other => Err(format!("unknown MoSCoW category: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrioritizedFeature {
    /// Join key back to local features (case-insensitive exact match)
    pub name: String,
    pub reach: f64,
    pub impact: f64,
    pub confidence: f64,
    pub effort: f64,
    pub moscow: Moscow,
    pub justification: String,
}

/// Envelope of the generate-stories result
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StoriesResult {
    pub stories: Vec<UserStory>,
}

/// Envelope of the prioritize-features result
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PrioritizedResult {
    pub features: Vec<PrioritizedFeature>,
}
