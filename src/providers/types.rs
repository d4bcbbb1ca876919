// Chat-completion wire types
//
// These follow the OpenAI Chat Completions format spoken by the AI gateway.
// Only the fields the relay sends or reads are modelled; unknown response
// fields are ignored.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Function tool definition (name, description and JSON-schema parameters)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Tool entry in the `tools` array of a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: ToolDefinition,
}

impl Tool {
    pub fn function(definition: ToolDefinition) -> Self {
        Self {
            tool_type: "function".to_string(),
            function: definition,
        }
    }
}

/// Forces the model to call one named function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolChoice {
    #[serde(rename = "type")]
    pub choice_type: String,
    pub function: ToolChoiceFunction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolChoiceFunction {
    pub name: String,
}

impl ToolChoice {
    pub fn forced(name: impl Into<String>) -> Self {
        Self {
            choice_type: "function".to_string(),
            function: ToolChoiceFunction { name: name.into() },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system" or "user" on the request side
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for `POST /v1/chat/completions`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Left empty to let the provider fill in its configured model
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
}

impl ChatRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            model: String::new(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            tools: Vec::new(),
            tool_choice: None,
        }
    }

    /// Attach a single tool and force the model to call it
    pub fn with_forced_tool(mut self, definition: ToolDefinition) -> Self {
        self.tool_choice = Some(ToolChoice::forced(definition.name.clone()));
        self.tools = vec![Tool::function(definition)];
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Text of the user turn, if any
    pub fn user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_str())
    }
}

/// Reply from the gateway. Every step towards the tool call may be missing
/// or null; that reads as "no tool call", not as a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub choices: Vec<Option<ChatChoice>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMessage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tool_calls: Vec<Option<ToolCall>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolCall {
    #[serde(default, deserialize_with = "null_as_default")]
    pub function: FunctionCall,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FunctionCall {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// JSON-encoded arguments
    #[serde(default, deserialize_with = "null_as_default")]
    pub arguments: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ChatResponse {
    /// The first tool call of the first choice, the only one a forced-tool reply carries
    pub fn first_tool_call(&self) -> Option<&ToolCall> {
        self.choices
            .first()?
            .as_ref()?
            .message
            .as_ref()?
            .tool_calls
            .first()?
            .as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_forced_tool_serialization() {
        let request = ChatRequest::new("sys", "hello")
            .with_model("google/gemini-3-flash-preview")
            .with_forced_tool(ToolDefinition {
                name: "analyze_feedback".to_string(),
                description: "d".to_string(),
                parameters: json!({ "type": "object" }),
            });

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "google/gemini-3-flash-preview");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hello");
        assert_eq!(value["tools"][0]["type"], "function");
        assert_eq!(value["tools"][0]["function"]["name"], "analyze_feedback");
        assert_eq!(
            value["tool_choice"],
            json!({ "type": "function", "function": { "name": "analyze_feedback" } })
        );
    }

    #[test]
    fn test_first_tool_call_absent() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Bonjour" } }]
        }))
        .unwrap();
        assert!(response.first_tool_call().is_none());

        let empty: ChatResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.first_tool_call().is_none());
    }

    #[test]
    fn test_null_steps_read_as_no_tool_call() {
        for body in [
            json!({ "choices": null }),
            json!({ "choices": [null] }),
            json!({ "choices": [{ "message": null }] }),
            json!({ "choices": [{ "message": { "tool_calls": null } }] }),
            json!({ "choices": [{ "message": { "tool_calls": [null] } }] }),
        ] {
            let response: ChatResponse = serde_json::from_value(body.clone()).unwrap();
            assert!(response.first_tool_call().is_none(), "{body}");
        }
    }

    #[test]
    fn test_null_function_fields_default_to_empty() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "tool_calls": [{ "function": { "name": "a", "arguments": null } }] } }]
        }))
        .unwrap();
        assert_eq!(response.first_tool_call().unwrap().function.arguments, "");
    }

    #[test]
    fn test_first_tool_call_present() {
        let response: ChatResponse = serde_json::from_value(json!({
            "id": "gen-1",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "tool_calls": [
                        { "id": "call_1", "type": "function",
                          "function": { "name": "a", "arguments": "{\"x\":1}" } },
                        { "id": "call_2", "type": "function",
                          "function": { "name": "b", "arguments": "{}" } }
                    ]
                },
                "finish_reason": "tool_calls"
            }]
        }))
        .unwrap();
        let call = response.first_tool_call().unwrap();
        assert_eq!(call.function.name, "a");
        assert_eq!(call.function.arguments, "{\"x\":1}");
    }
}
