// Function tool definitions
//
// The parameter schemas are what the gateway enforces on the model's reply.
// Field names here are the field names the client deserializes, so any change
// must be mirrored in `client::types`.

use serde_json::{json, Value};

use crate::providers::types::ToolDefinition;

pub const ANALYZE_FEEDBACK_TOOL: &str = "analyze_feedback";
pub const GENERATE_STORIES_TOOL: &str = "generate_user_stories";
pub const PRIORITIZE_FEATURES_TOOL: &str = "prioritize_features";

/// Closed object schema: every listed property is required, nothing else allowed.
fn object(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

fn string_list(description: Option<&str>) -> Value {
    let mut schema = json!({ "type": "array", "items": { "type": "string" } });
    if let Some(description) = description {
        schema["description"] = json!(description);
    }
    schema
}

pub fn analyze_feedback() -> ToolDefinition {
    let feature_request = object(
        json!({
            "title": { "type": "string" },
            "priority": { "type": "string", "enum": ["Critique", "Haute", "Moyenne", "Basse"] },
            "mentions": { "type": "number" },
        }),
        &["title", "priority", "mentions"],
    );

    ToolDefinition {
        name: ANALYZE_FEEDBACK_TOOL.to_string(),
        description: "Return structured feedback analysis".to_string(),
        parameters: object(
            json!({
                "summary": { "type": "string", "description": "Résumé actionnable de 2-3 phrases" },
                "sentiment": { "type": "string", "enum": ["positive", "negative", "mixed"] },
                "patterns": string_list(Some("Patterns et tendances identifiés")),
                "featureRequests": { "type": "array", "items": feature_request },
                "painPoints": string_list(Some("Points de douleur identifiés")),
            }),
            &["summary", "sentiment", "patterns", "featureRequests", "painPoints"],
        ),
    }
}

pub fn generate_user_stories() -> ToolDefinition {
    let story = object(
        json!({
            "role": { "type": "string" },
            "action": { "type": "string" },
            "benefit": { "type": "string" },
            "acceptanceCriteria": string_list(None),
            "complexity": { "type": "string", "enum": ["XS", "S", "M", "L", "XL"] },
            "complexityReason": { "type": "string" },
        }),
        &[
            "role",
            "action",
            "benefit",
            "acceptanceCriteria",
            "complexity",
            "complexityReason",
        ],
    );

    ToolDefinition {
        name: GENERATE_STORIES_TOOL.to_string(),
        description: "Return generated user stories".to_string(),
        parameters: object(
            json!({ "stories": { "type": "array", "items": story } }),
            &["stories"],
        ),
    }
}

pub fn prioritize_features() -> ToolDefinition {
    let feature = object(
        json!({
            "name": { "type": "string" },
            "reach": { "type": "number" },
            "impact": { "type": "number" },
            "confidence": { "type": "number" },
            "effort": { "type": "number" },
            "moscow": { "type": "string", "enum": ["must", "should", "could", "wont"] },
            "justification": { "type": "string" },
        }),
        &[
            "name",
            "reach",
            "impact",
            "confidence",
            "effort",
            "moscow",
            "justification",
        ],
    );

    ToolDefinition {
        name: PRIORITIZE_FEATURES_TOOL.to_string(),
        description: "Return prioritized features with RICE scores and MoSCoW categories"
            .to_string(),
        parameters: object(
            json!({ "features": { "type": "array", "items": feature } }),
            &["features"],
        ),
    }
}
