// Response translation: upstream reply → relay result or relay error

use serde_json::Value;

use super::error::RelayError;
use crate::providers::{ChatResponse, UpstreamError};

/// Map an upstream failure to what the relay reports.
///
/// Only 429 and 402 get their own message; every other status is a generic
/// service failure. Transport and decode failures keep their text.
pub fn map_upstream_error(error: UpstreamError) -> RelayError {
    match error {
        UpstreamError::Status { status, .. } => match status.as_u16() {
            429 => RelayError::RateLimited,
            402 => RelayError::CreditsExhausted,
            _ => RelayError::Upstream,
        },
        UpstreamError::Transport(_) | UpstreamError::Decode(_) => {
            RelayError::internal(error.to_string())
        }
    }
}

/// Pull the structured payload out of a forced-tool reply.
///
/// The arguments are returned verbatim: the shape was enforced upstream and is
/// not re-validated here.
pub fn extract_tool_result(response: &ChatResponse) -> Result<Value, RelayError> {
    let Some(tool_call) = response.first_tool_call() else {
        tracing::error!(
            id = response.id.as_deref().unwrap_or("-"),
            "No tool call in response"
        );
        return Err(RelayError::NoStructuredResult);
    };

    serde_json::from_str(&tool_call.function.arguments).map_err(|e| {
        tracing::error!(
            tool = %tool_call.function.name,
            error = %e,
            "Tool call arguments are not valid JSON"
        );
        RelayError::NoStructuredResult
    })
}
